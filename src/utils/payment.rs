//! Payment gateway signatures.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with the merchant secret
//! using HMAC-SHA256 and sends the hex digest back through the client.
//! The pair is joined without escaping, so ids containing `|` can collide;
//! locally minted order ids never do.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const ORDER_ID_PREFIX: &str = "order_";

/// Locally minted order id, unique per purchase.
pub fn generate_order_id() -> String {
    format!("{ORDER_ID_PREFIX}{}", Uuid::new_v4().simple())
}

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> Result<HmacSha256, InvalidLength> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(mac)
}

/// Hex-encoded signature the gateway would produce.
pub fn compute_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
) -> Result<String, InvalidLength> {
    let mac = mac_for(secret, order_id, payment_id)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a hex signature. Anything that is not valid hex
/// is a mismatch.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(mac) = mac_for(secret, order_id, payment_id) else {
        return false;
    };
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_order_id_format() {
        let id = generate_order_id();
        assert!(id.starts_with(ORDER_ID_PREFIX));
        assert_eq!(id.len(), ORDER_ID_PREFIX.len() + 32);
        assert_ne!(id, generate_order_id());
    }

    #[test]
    fn test_known_vector() {
        let signature = compute_signature("key", "order_abc", "pay_xyz").unwrap();
        assert_eq!(
            signature,
            "7070a058aface5146243e06b3b7921a0ca337d5db82a92eb9fb2b7984c2586c6"
        );
    }

    #[test]
    fn test_verify_accepts_matching_signature() {
        let signature = compute_signature(SECRET, "order_1", "pay_1").unwrap();
        assert!(verify_signature(SECRET, "order_1", "pay_1", &signature));
        assert!(verify_signature(
            SECRET,
            "order_1",
            "pay_1",
            &signature.to_uppercase()
        ));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let signature = compute_signature(SECRET, "order_1", "pay_1").unwrap();
        assert!(!verify_signature(SECRET, "order_1", "pay_2", &signature));
        assert!(!verify_signature("other-secret", "order_1", "pay_1", &signature));
        assert!(!verify_signature(SECRET, "order_1", "pay_1", "not-hex"));
        assert!(!verify_signature(SECRET, "order_1", "pay_1", ""));
    }

    fn raw_hmac(message: &str) -> String {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_signature_covers_pipe_joined_pair() {
        let signature = compute_signature(SECRET, "order_1", "pay").unwrap();
        assert_eq!(signature, raw_hmac("order_1|pay"));
        assert_ne!(signature, raw_hmac("order_1pay"));
    }
}
