//! Payment gateway credentials.
//!
//! The key id is handed to clients for checkout; the key secret signs the
//! `order_id|payment_id` pair the gateway returns and never leaves the server.

#[derive(Clone, Debug)]
pub struct PaymentConfig {
    pub key_id: String,
    pub key_secret: String,
    pub currency: String,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        Self {
            key_id: crate::env_or("PAYMENT_KEY_ID", ""),
            key_secret: crate::env_or("PAYMENT_KEY_SECRET", "learnhub-dev-payment-secret"),
            currency: crate::env_or("CURRENCY", "INR"),
        }
    }
}
