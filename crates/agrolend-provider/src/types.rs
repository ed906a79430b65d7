use serde::{Deserialize, Deserializer, Serialize};

/// Standard Paystack response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Settlement parameters embedded in the payment's metadata at initiation
/// time by the browser client.
///
/// Trusted as-is once the provider confirms the payment — the provider's
/// verification response is authoritative for settlement parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementMetadata {
    pub pool: String,
    pub fiat: String,
    /// Amount in the token's smallest unit. The client historically sent
    /// this as a JSON number, so both forms are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub behalf_of: String,
}

/// Payload of `GET /transaction/verify/{reference}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationData {
    /// Provider-side transaction status ("success", "failed", "abandoned").
    pub status: String,
    pub reference: String,
    #[serde(default)]
    pub currency: Option<String>,
    /// Paystack returns `""` instead of an object when no metadata was set.
    #[serde(default, deserialize_with = "lenient_metadata")]
    pub metadata: Option<SettlementMetadata>,
}

/// A bank supported by the provider for transfers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Result of resolving an account number to its holder's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAccount {
    pub account_number: String,
    pub account_name: String,
}

/// Payload of `POST /transferrecipient`.
#[derive(Debug, Deserialize)]
pub struct RecipientData {
    pub recipient_code: String,
}

/// Payload of `POST /transfer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferData {
    pub transfer_code: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A fiat payout to a bank account, keyed by the on-chain transaction that
/// released the funds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub account_name: String,
    pub account_number: String,
    pub bank_code: String,
    pub currency: String,
    /// Amount in the provider's smallest unit (e.g. kobo).
    pub amount: String,
    /// Transfer reference — the txId of the on-chain withdraw/borrow.
    pub reference: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number amount, got {other}"
        ))),
    }
}

fn lenient_metadata<'de, D>(deserializer: D) -> Result<Option<SettlementMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_amount_as_string() {
        let json = r#"{"pool":"0x1","fiat":"0x2","amount":"500000","behalfOf":"0x3"}"#;
        let metadata: SettlementMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.amount, "500000");
    }

    #[test]
    fn test_metadata_amount_as_number() {
        let json = r#"{"pool":"0x1","fiat":"0x2","amount":500000,"behalfOf":"0x3"}"#;
        let metadata: SettlementMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.amount, "500000");
    }

    #[test]
    fn test_metadata_amount_rejects_bool() {
        let json = r#"{"pool":"0x1","fiat":"0x2","amount":true,"behalfOf":"0x3"}"#;
        assert!(serde_json::from_str::<SettlementMetadata>(json).is_err());
    }

    #[test]
    fn test_verification_with_empty_string_metadata() {
        let json = r#"{"status":"success","reference":"ref-1","metadata":""}"#;
        let data: VerificationData = serde_json::from_str(json).unwrap();
        assert!(data.metadata.is_none());
    }

    #[test]
    fn test_verification_without_metadata_field() {
        let json = r#"{"status":"abandoned","reference":"ref-2"}"#;
        let data: VerificationData = serde_json::from_str(json).unwrap();
        assert!(data.metadata.is_none());
        assert_eq!(data.status, "abandoned");
    }

    #[test]
    fn test_envelope_with_data() {
        let json = r#"{"status":true,"message":"Verification successful","data":{"status":"success","reference":"r"}}"#;
        let envelope: ApiEnvelope<VerificationData> = serde_json::from_str(json).unwrap();
        assert!(envelope.status);
        assert_eq!(envelope.data.unwrap().reference, "r");
    }

    #[test]
    fn test_envelope_without_data() {
        let json = r#"{"status":false,"message":"Transaction reference not found"}"#;
        let envelope: ApiEnvelope<VerificationData> = serde_json::from_str(json).unwrap();
        assert!(!envelope.status);
        assert!(envelope.data.is_none());
    }
}
