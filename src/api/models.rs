use serde::{Deserialize, Deserializer, Serialize};

/// Sandbox ids come back as JSON numbers for profiles and accounts but as
/// UUID strings for quotes; both are carried as strings downstream.
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub r#type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub rate: f64,
    pub source_currency: String,
    pub target_currency: String,
    pub source_amount: f64,
    #[serde(default)]
    pub payment_options: Vec<PaymentOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOption {
    pub pay_in: String,
    pub pay_out: String,
    pub source_currency: Option<String>,
    pub target_currency: String,
    pub target_amount: f64,
    pub fee: Option<Fee>,
    pub formatted_estimated_delivery: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub source_currency: String,
    pub target_currency: String,
    pub source_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRequest {
    pub account_holder_name: String,
    pub currency: String,
    pub r#type: String,
    pub details: RecipientDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDetails {
    pub legal_type: String,
    pub sort_code: String,
    pub account_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub target_account: String,
    pub quote_uuid: String,
    pub customer_transaction_id: String,
    pub details: TransferDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDetails {
    pub reference: String,
}

impl TransferRequest {
    /// A fresh idempotency token is generated per constructed request, so a
    /// resubmitted attempt never reuses one.
    pub fn new(quote_id: &str, recipient_id: &str, reference: &str) -> Self {
        Self {
            target_account: recipient_id.to_string(),
            quote_uuid: quote_id.to_string(),
            customer_transaction_id: uuid::Uuid::new_v4().to_string(),
            details: TransferDetails {
                reference: reference.to_string(),
            },
        }
    }
}
