use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::config::CheckoutSettings;

// ============================================================================
// Payment Initiation
// ============================================================================

/// What the gateway needs to start a payment for one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutCart {
    pub item_name: String,
    pub total: u64,
    pub order_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("Checkout initiation failed: {0}")]
    Declined(String),

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Starts a payment and returns the URL the customer should follow
#[async_trait]
pub trait PaymentInitiator: Send + Sync {
    async fn initiate(&self, cart: &CheckoutCart) -> Result<String, PaymentError>;
}

/// Builds the gateway redirect URL directly from the cart. Request signing
/// belongs to the gateway integration and is not done here.
pub struct RedirectPaymentInitiator {
    settings: CheckoutSettings,
}

impl RedirectPaymentInitiator {
    pub fn new(settings: CheckoutSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl PaymentInitiator for RedirectPaymentInitiator {
    async fn initiate(&self, cart: &CheckoutCart) -> Result<String, PaymentError> {
        if self.settings.host_url.is_empty() {
            return Err(PaymentError::Unavailable("no payment host configured".to_string()));
        }

        let order_id = cart.order_id.to_string();
        let amount = format!("{}.00", cart.total);
        let mut params = vec![
            ("m_payment_id", order_id.as_str()),
            ("amount", amount.as_str()),
            ("item_name", cart.item_name.as_str()),
            ("name_first", cart.first_name.as_str()),
            ("name_last", cart.last_name.as_str()),
            ("email_address", cart.email.as_str()),
        ];
        for (key, value) in [
            ("return_url", &self.settings.return_url),
            ("cancel_url", &self.settings.cancel_url),
            ("notify_url", &self.settings.notify_url),
        ] {
            if !value.is_empty() {
                params.push((key, value.as_str()));
            }
        }

        let url = Url::parse_with_params(&self.settings.host_url, &params)
            .map_err(|e| PaymentError::Unavailable(format!("bad payment host url: {}", e)))?;

        tracing::info!(order_id = %cart.order_id, total = cart.total, "Checkout redirect built");
        Ok(url.into())
    }
}
