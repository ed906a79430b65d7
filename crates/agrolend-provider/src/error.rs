/// Payment-provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider API error: {0}")]
    Api(String),

    #[error("provider response carried no data")]
    MissingData,
}
