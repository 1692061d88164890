use async_trait::async_trait;
use num_traits::ToPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::payouts::payouts_errors::PayoutError;
use crate::payouts::payouts_model::PaymentAccountStatus;
use crate::payouts::payouts_traits::PaymentProviderTrait;

const BASE_URL: &str = "https://api.stripe.com/v1";

/// Stripe Connect provider for contractor accounts and payout transfers
pub struct StripeProvider {
    client: Client,
    api_key: String,
    base_url: String,
    onboarding_return_url: String,
}

#[derive(Deserialize)]
struct AccountResponse {
    id: String,
    #[serde(default)]
    details_submitted: bool,
    #[serde(default)]
    payouts_enabled: bool,
}

#[derive(Deserialize)]
struct AccountLinkResponse {
    url: String,
}

#[derive(Deserialize)]
struct TransferResponse {
    id: String,
}

impl StripeProvider {
    pub fn new(api_key: String, onboarding_return_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        StripeProvider {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
            onboarding_return_url,
        }
    }

    /// Point the client at a mock server in tests
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn post_form<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        form: &[(&str, String)],
        idempotency_key: Option<&str>,
    ) -> Result<T, PayoutError> {
        let mut request_builder = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .basic_auth(&self.api_key, None::<&str>)
            .form(form);

        if let Some(key) = idempotency_key {
            request_builder = request_builder.header("Idempotency-Key", key);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| PayoutError::Provider(format!("Stripe request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PayoutError::Provider(format!(
                "Stripe API error {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PayoutError::Provider(format!("Failed to parse Stripe response: {}", e)))
    }
}

#[async_trait]
impl PaymentProviderTrait for StripeProvider {
    async fn create_account(&self, contractor_id: &str) -> Result<String, PayoutError> {
        let form = [
            ("type", "express".to_string()),
            ("metadata[contractor_id]", contractor_id.to_string()),
        ];
        let account: AccountResponse = self.post_form("/accounts", &form, None).await?;
        Ok(account.id)
    }

    async fn account_status(&self, account_ref: &str) -> Result<PaymentAccountStatus, PayoutError> {
        let response = self
            .client
            .get(format!("{}/accounts/{}", self.base_url, account_ref))
            .basic_auth(&self.api_key, None::<&str>)
            .send()
            .await
            .map_err(|e| PayoutError::Provider(format!("Stripe request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PayoutError::Provider(format!(
                "Stripe API error {}",
                response.status()
            )));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| PayoutError::Provider(format!("Failed to parse Stripe response: {}", e)))?;

        Ok(PaymentAccountStatus {
            account_ref: account.id,
            onboarding_complete: account.details_submitted,
            payouts_enabled: account.payouts_enabled,
        })
    }

    async fn onboarding_link(&self, account_ref: &str) -> Result<String, PayoutError> {
        let form = [
            ("account", account_ref.to_string()),
            ("type", "account_onboarding".to_string()),
            ("refresh_url", self.onboarding_return_url.clone()),
            ("return_url", self.onboarding_return_url.clone()),
        ];
        let link: AccountLinkResponse = self.post_form("/account_links", &form, None).await?;
        Ok(link.url)
    }

    async fn release_payout(
        &self,
        booking_id: &str,
        account_ref: &str,
        amount: Decimal,
    ) -> Result<String, PayoutError> {
        let cents = (amount * Decimal::ONE_HUNDRED).to_i64().ok_or_else(|| {
            PayoutError::Provider(format!("amount {} cannot be expressed in cents", amount))
        })?;

        let form = [
            ("amount", cents.to_string()),
            ("currency", "usd".to_string()),
            ("destination", account_ref.to_string()),
            ("transfer_group", format!("booking_{}", booking_id)),
        ];
        // The booking id keys the transfer so provider-side retries collapse.
        let idempotency_key = format!("payout-{}", booking_id);
        let transfer: TransferResponse = self
            .post_form("/transfers", &form, Some(&idempotency_key))
            .await?;
        Ok(transfer.id)
    }
}
