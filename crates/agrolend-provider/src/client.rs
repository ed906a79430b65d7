use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::error::ProviderError;
use crate::types::{
    ApiEnvelope, Bank, PayoutRequest, RecipientData, ResolvedAccount, TransferData,
    VerificationData,
};

pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Outbound bank-rail operations the node brokers for the browser client.
#[async_trait]
pub trait BankGateway: Send + Sync {
    /// Pay out fiat to a bank account: create a transfer recipient, then
    /// initiate a balance transfer referenced by the on-chain txId.
    async fn payout(&self, request: &PayoutRequest) -> Result<TransferData, ProviderError>;

    /// List banks supported for transfers, optionally filtered by currency.
    async fn list_banks(&self, currency: Option<&str>) -> Result<Vec<Bank>, ProviderError>;

    /// Resolve an account number to the holder's registered name.
    async fn resolve_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<ResolvedAccount, ProviderError>;
}

/// Thin client over the Paystack REST API.
pub struct PaystackClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: Zeroizing<String>,
}

impl PaystackClient {
    pub fn new(secret_key: Zeroizing<String>) -> Self {
        Self::with_base_url(secret_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(secret_key: Zeroizing<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            secret_key,
        }
    }

    /// Fetch the provider's view of a transaction by its reference.
    pub async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerificationData, ProviderError> {
        let url = format!("{}/transaction/verify/{reference}", self.base_url);
        let envelope: ApiEnvelope<VerificationData> = self
            .http
            .get(&url)
            .bearer_auth(self.secret_key.as_str())
            .send()
            .await?
            .json()
            .await?;
        if !envelope.status {
            return Err(ProviderError::Api(envelope.message));
        }
        envelope.data.ok_or(ProviderError::MissingData)
    }

    /// Register a NUBAN transfer recipient; returns the recipient code.
    pub async fn create_transfer_recipient(
        &self,
        name: &str,
        account_number: &str,
        bank_code: &str,
        currency: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/transferrecipient", self.base_url);
        let envelope: ApiEnvelope<RecipientData> = self
            .http
            .post(&url)
            .bearer_auth(self.secret_key.as_str())
            .json(&serde_json::json!({
                "type": "nuban",
                "name": name,
                "account_number": account_number,
                "bank_code": bank_code,
                "currency": currency,
            }))
            .send()
            .await?
            .json()
            .await?;
        if !envelope.status {
            return Err(ProviderError::Api(envelope.message));
        }
        envelope
            .data
            .map(|d| d.recipient_code)
            .ok_or(ProviderError::MissingData)
    }

    /// Initiate a transfer from the provider balance to a recipient.
    pub async fn initiate_transfer(
        &self,
        amount: &str,
        recipient_code: &str,
        reference: &str,
    ) -> Result<TransferData, ProviderError> {
        let url = format!("{}/transfer", self.base_url);
        let envelope: ApiEnvelope<TransferData> = self
            .http
            .post(&url)
            .bearer_auth(self.secret_key.as_str())
            .json(&serde_json::json!({
                "source": "balance",
                "amount": amount,
                "recipient": recipient_code,
                "reference": reference,
                "reason": "",
            }))
            .send()
            .await?
            .json()
            .await?;
        if !envelope.status {
            return Err(ProviderError::Api(envelope.message));
        }
        envelope.data.ok_or(ProviderError::MissingData)
    }
}

#[async_trait]
impl BankGateway for PaystackClient {
    async fn payout(&self, request: &PayoutRequest) -> Result<TransferData, ProviderError> {
        let recipient_code = self
            .create_transfer_recipient(
                &request.account_name,
                &request.account_number,
                &request.bank_code,
                &request.currency,
            )
            .await?;
        tracing::info!(
            reference = %request.reference,
            recipient_code,
            "transfer recipient created"
        );
        let transfer = self
            .initiate_transfer(&request.amount, &recipient_code, &request.reference)
            .await?;
        tracing::info!(
            reference = %request.reference,
            transfer_code = %transfer.transfer_code,
            "bank transfer initiated"
        );
        Ok(transfer)
    }

    async fn list_banks(&self, currency: Option<&str>) -> Result<Vec<Bank>, ProviderError> {
        let url = format!("{}/bank", self.base_url);
        let mut request = self.http.get(&url).bearer_auth(self.secret_key.as_str());
        if let Some(currency) = currency {
            request = request.query(&[("currency", currency)]);
        }
        let envelope: ApiEnvelope<Vec<Bank>> = request.send().await?.json().await?;
        if !envelope.status {
            return Err(ProviderError::Api(envelope.message));
        }
        envelope.data.ok_or(ProviderError::MissingData)
    }

    async fn resolve_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<ResolvedAccount, ProviderError> {
        let url = format!("{}/bank/resolve", self.base_url);
        let envelope: ApiEnvelope<ResolvedAccount> = self
            .http
            .get(&url)
            .bearer_auth(self.secret_key.as_str())
            .query(&[
                ("account_number", account_number),
                ("bank_code", bank_code),
            ])
            .send()
            .await?
            .json()
            .await?;
        if !envelope.status {
            return Err(ProviderError::Api(envelope.message));
        }
        envelope.data.ok_or(ProviderError::MissingData)
    }
}
