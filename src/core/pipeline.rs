use crate::api::models::{
    Profile, Quote, QuoteRequest, RecipientDetails, RecipientRequest, TransferRequest,
};
use crate::api::ports::PayoutApi;
use crate::utils::error::{PayoutError, Result};

/// The only pay-in/pay-out method the pipeline prices against.
const BANK_TRANSFER: &str = "BANK_TRANSFER";

/// Fixed parameters of the one transfer this pipeline creates. These are
/// deliberately not CLI-configurable; the sandbox flow is SGD->GBP into a UK
/// sort-code account.
#[derive(Debug, Clone)]
pub struct TransferOrder {
    pub source_currency: String,
    pub target_currency: String,
    pub source_amount: f64,
    pub recipient: RecipientRequest,
    pub reference: String,
}

impl Default for TransferOrder {
    fn default() -> Self {
        Self {
            source_currency: "SGD".to_string(),
            target_currency: "GBP".to_string(),
            source_amount: 1000.0,
            recipient: RecipientRequest {
                account_holder_name: "GBP Person Name".to_string(),
                currency: "GBP".to_string(),
                r#type: "sort_code".to_string(),
                details: RecipientDetails {
                    legal_type: "PRIVATE".to_string(),
                    sort_code: "04-00-04".to_string(),
                    account_number: "12345678".to_string(),
                },
            },
            reference: "Test Transfer".to_string(),
        }
    }
}

impl TransferOrder {
    fn quote_request(&self) -> QuoteRequest {
        QuoteRequest {
            source_currency: self.source_currency.clone(),
            target_currency: self.target_currency.clone(),
            source_amount: self.source_amount,
        }
    }
}

/// Informational fields taken from the matching payment option. None of this
/// feeds back into later requests.
#[derive(Debug, Clone)]
pub struct PaymentSummary {
    pub target_amount: f64,
    pub target_currency: String,
    pub rate: f64,
    pub fee_total: Option<f64>,
    pub fee_currency: Option<String>,
    pub estimated_delivery: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransferReport {
    pub profile_id: String,
    pub quote_id: String,
    pub recipient_id: String,
    pub transfer_id: String,
    pub status: String,
    pub customer_transaction_id: String,
    pub payment: Option<PaymentSummary>,
}

/// Executes the four dependent remote calls in fixed order, threading each
/// response's identifier into the next request. Any fatal condition aborts
/// the remaining steps; a quote without a BANK_TRANSFER option only drops
/// the informational output.
pub struct TransferPipeline<A: PayoutApi> {
    api: A,
    order: TransferOrder,
}

impl<A: PayoutApi> TransferPipeline<A> {
    pub fn new(api: A, order: TransferOrder) -> Self {
        Self { api, order }
    }

    pub async fn run(&self) -> Result<TransferReport> {
        // Step 1: select the personal profile
        let profiles = self.api.list_profiles().await?;
        let profile_id = select_personal_profile(&profiles)?.id.clone();
        tracing::info!("✅ Selected personal profile {}", profile_id);
        println!("Profile ID: {}", profile_id);

        // Step 2: price the conversion under that profile
        let quote = self
            .api
            .create_quote(&profile_id, &self.order.quote_request())
            .await?;
        if quote.id.trim().is_empty() {
            return Err(PayoutError::validation("Failed to create quote."));
        }
        println!("Quote ID: {}", quote.id);

        let payment = summarize_bank_transfer_option(&quote);
        match &payment {
            Some(summary) => {
                println!(
                    "Recipient will receive: {:.2} {}",
                    summary.target_amount, summary.target_currency
                );
                println!("Exchange Rate: {:.4}", summary.rate);
                match (summary.fee_total, summary.fee_currency.as_deref()) {
                    (Some(total), Some(currency)) => println!("Total Fee: {:.2} {}", total, currency),
                    _ => tracing::warn!("Fee information is missing or incomplete."),
                }
                println!(
                    "Estimated Delivery: {}",
                    summary.estimated_delivery.as_deref().unwrap_or("Unknown")
                );
            }
            None => tracing::warn!("No BANK_TRANSFER option available in quote."),
        }

        // Step 3: register the destination account
        let recipient = self.api.create_recipient(&self.order.recipient).await?;
        if recipient.id.trim().is_empty() {
            return Err(PayoutError::validation("Failed to create recipient."));
        }
        println!("Recipient ID: {}", recipient.id);

        // Step 4: create the transfer under a fresh idempotency token
        let request = TransferRequest::new(&quote.id, &recipient.id, &self.order.reference);
        let customer_transaction_id = request.customer_transaction_id.clone();
        let transfer = self.api.create_transfer(&request).await?;
        if transfer.id.trim().is_empty() {
            return Err(PayoutError::validation("Failed to create transfer."));
        }
        println!("Transfer ID: {}", transfer.id);

        let status = transfer.status.unwrap_or_else(|| "Unknown".to_string());
        println!("Transfer Status: {}", status);
        println!("All tasks completed successfully.");

        Ok(TransferReport {
            profile_id,
            quote_id: quote.id,
            recipient_id: recipient.id,
            transfer_id: transfer.id,
            status,
            customer_transaction_id,
            payment,
        })
    }
}

fn select_personal_profile(profiles: &[Profile]) -> Result<&Profile> {
    if profiles.is_empty() {
        return Err(PayoutError::validation("No profiles returned from API."));
    }
    profiles
        .iter()
        .find(|profile| profile.r#type.eq_ignore_ascii_case("personal"))
        .ok_or_else(|| PayoutError::validation("No personal profile found."))
}

fn summarize_bank_transfer_option(quote: &Quote) -> Option<PaymentSummary> {
    quote
        .payment_options
        .iter()
        .find(|option| option.pay_in == BANK_TRANSFER && option.pay_out == BANK_TRANSFER)
        .map(|option| PaymentSummary {
            target_amount: option.target_amount,
            target_currency: option.target_currency.clone(),
            rate: quote.rate,
            fee_total: option.fee.as_ref().map(|fee| fee.total),
            fee_currency: option.source_currency.clone(),
            estimated_delivery: option.formatted_estimated_delivery.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Fee, PaymentOption, Recipient, Transfer};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct ScriptedApi {
        profiles: Vec<Profile>,
        quote: Option<Quote>,
        fail_quote_with_status: Option<u16>,
        transfer_status: Option<String>,
        calls: Mutex<Vec<&'static str>>,
        transfer_requests: Mutex<Vec<TransferRequest>>,
    }

    impl ScriptedApi {
        fn with_profiles(mut self, profiles: Vec<Profile>) -> Self {
            self.profiles = profiles;
            self
        }

        fn with_quote(mut self, quote: Quote) -> Self {
            self.quote = Some(quote);
            self
        }

        fn with_transfer_status(mut self, status: &str) -> Self {
            self.transfer_status = Some(status.to_string());
            self
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PayoutApi for Arc<ScriptedApi> {
        async fn list_profiles(&self) -> Result<Vec<Profile>> {
            self.calls.lock().unwrap().push("list_profiles");
            Ok(self.profiles.clone())
        }

        async fn create_quote(&self, _profile_id: &str, _request: &QuoteRequest) -> Result<Quote> {
            self.calls.lock().unwrap().push("create_quote");
            if let Some(status) = self.fail_quote_with_status {
                return Err(PayoutError::ApiError {
                    status,
                    trace_id: Some("trace-1".to_string()),
                    body: "{\"error\":\"rejected\"}".to_string(),
                });
            }
            Ok(self.quote.clone().expect("scripted quote"))
        }

        async fn create_recipient(&self, _request: &RecipientRequest) -> Result<Recipient> {
            self.calls.lock().unwrap().push("create_recipient");
            Ok(Recipient {
                id: "r1".to_string(),
            })
        }

        async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer> {
            self.calls.lock().unwrap().push("create_transfer");
            self.transfer_requests.lock().unwrap().push(request.clone());
            Ok(Transfer {
                id: "t1".to_string(),
                status: self.transfer_status.clone(),
            })
        }
    }

    fn profile(id: &str, kind: &str) -> Profile {
        Profile {
            id: id.to_string(),
            r#type: kind.to_string(),
        }
    }

    fn bank_transfer_quote() -> Quote {
        Quote {
            id: "q1".to_string(),
            rate: 5.123456,
            source_currency: "SGD".to_string(),
            target_currency: "GBP".to_string(),
            source_amount: 1000.0,
            payment_options: vec![PaymentOption {
                pay_in: "BANK_TRANSFER".to_string(),
                pay_out: "BANK_TRANSFER".to_string(),
                source_currency: Some("SGD".to_string()),
                target_currency: "GBP".to_string(),
                target_amount: 5123.46,
                fee: Some(Fee { total: 12.3 }),
                formatted_estimated_delivery: Some("by tomorrow".to_string()),
            }],
        }
    }

    #[tokio::test]
    async fn test_selects_personal_profile_case_insensitively() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_profiles(vec![profile("p1", "business"), profile("p2", "PERSONAL")])
                .with_quote(bank_transfer_quote())
                .with_transfer_status("processing"),
        );
        let pipeline = TransferPipeline::new(Arc::clone(&api), TransferOrder::default());

        let report = pipeline.run().await.unwrap();

        assert_eq!(report.profile_id, "p2");
        assert_eq!(report.quote_id, "q1");
        assert_eq!(report.recipient_id, "r1");
        assert_eq!(report.transfer_id, "t1");
        assert_eq!(report.status, "processing");

        let summary = report.payment.expect("bank transfer summary");
        assert_eq!(summary.target_amount, 5123.46);
        assert_eq!(summary.target_currency, "GBP");
        assert_eq!(summary.rate, 5.123456);
        assert_eq!(summary.fee_total, Some(12.3));
        assert_eq!(summary.fee_currency.as_deref(), Some("SGD"));
        assert_eq!(summary.estimated_delivery.as_deref(), Some("by tomorrow"));
    }

    #[tokio::test]
    async fn test_empty_profile_list_halts_before_quote() {
        let api = Arc::new(ScriptedApi::default());
        let pipeline = TransferPipeline::new(Arc::clone(&api), TransferOrder::default());

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.user_friendly_message(), "No profiles returned from API.");
        assert_eq!(api.calls(), vec!["list_profiles"]);
    }

    #[tokio::test]
    async fn test_no_personal_profile_halts_before_quote() {
        let api = Arc::new(ScriptedApi::default().with_profiles(vec![profile("p1", "business")]));
        let pipeline = TransferPipeline::new(Arc::clone(&api), TransferOrder::default());

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.user_friendly_message(), "No personal profile found.");
        assert_eq!(api.calls(), vec!["list_profiles"]);
    }

    #[tokio::test]
    async fn test_quote_failure_halts_before_recipient_creation() {
        let api = Arc::new(ScriptedApi {
            profiles: vec![profile("p2", "personal")],
            fail_quote_with_status: Some(422),
            ..ScriptedApi::default()
        });
        let pipeline = TransferPipeline::new(Arc::clone(&api), TransferOrder::default());

        let err = pipeline.run().await.unwrap_err();

        assert!(matches!(err, PayoutError::ApiError { status: 422, .. }));
        assert_eq!(api.calls(), vec!["list_profiles", "create_quote"]);
    }

    #[tokio::test]
    async fn test_missing_bank_transfer_option_is_non_fatal() {
        let mut quote = bank_transfer_quote();
        quote.payment_options[0].pay_in = "BALANCE".to_string();

        let api = Arc::new(
            ScriptedApi::default()
                .with_profiles(vec![profile("p2", "Personal")])
                .with_quote(quote)
                .with_transfer_status("incoming_payment_waiting"),
        );
        let pipeline = TransferPipeline::new(Arc::clone(&api), TransferOrder::default());

        let report = pipeline.run().await.unwrap();

        assert!(report.payment.is_none());
        assert_eq!(
            api.calls(),
            vec!["list_profiles", "create_quote", "create_recipient", "create_transfer"]
        );
    }

    #[tokio::test]
    async fn test_missing_transfer_status_falls_back_to_unknown() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_profiles(vec![profile("p2", "personal")])
                .with_quote(bank_transfer_quote()),
        );
        let pipeline = TransferPipeline::new(Arc::clone(&api), TransferOrder::default());

        let report = pipeline.run().await.unwrap();

        assert_eq!(report.status, "Unknown");
    }

    #[tokio::test]
    async fn test_each_run_uses_a_fresh_idempotency_token() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_profiles(vec![profile("p2", "personal")])
                .with_quote(bank_transfer_quote())
                .with_transfer_status("processing"),
        );
        let pipeline = TransferPipeline::new(Arc::clone(&api), TransferOrder::default());

        let first = pipeline.run().await.unwrap();
        let second = pipeline.run().await.unwrap();

        assert_ne!(first.customer_transaction_id, second.customer_transaction_id);

        let requests = api.transfer_requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_ne!(requests[0].customer_transaction_id, requests[1].customer_transaction_id);
        assert_eq!(requests[0].quote_uuid, "q1");
        assert_eq!(requests[0].target_account, "r1");
        assert_eq!(requests[0].details.reference, "Test Transfer");
    }

    #[test]
    fn test_select_personal_profile_rejects_blank_collection() {
        let err = select_personal_profile(&[]).unwrap_err();
        assert_eq!(err.user_friendly_message(), "No profiles returned from API.");
    }

    #[test]
    fn test_summary_carries_missing_fee_as_none() {
        let mut quote = bank_transfer_quote();
        quote.payment_options[0].fee = None;
        quote.payment_options[0].source_currency = None;

        let summary = summarize_bank_transfer_option(&quote).unwrap();
        assert_eq!(summary.fee_total, None);
        assert_eq!(summary.fee_currency, None);
    }
}
