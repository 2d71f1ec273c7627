use anyhow::anyhow;
use learnhub_config::PaymentConfig;
use learnhub_core::AppError;
use learnhub_db::{Stores, Transition};
use learnhub_models::CourseId;
use learnhub_models::purchases::{CheckoutResponse, NewPurchase, Purchase, VerifyPaymentDto};
use learnhub_models::users::User;
use learnhub_observability::track_purchase_completed;
use tracing::{info, instrument, warn};

use crate::modules::courses::service::COURSE_NOT_FOUND_MESSAGE;
use crate::utils::payment::{generate_order_id, verify_signature};

pub const ALREADY_ENROLLED_MESSAGE: &str = "Already enrolled";
pub const OWN_COURSE_MESSAGE: &str = "You cannot purchase your own course";
pub const PURCHASE_NOT_FOUND_MESSAGE: &str = "Purchase not found";
pub const INVALID_SIGNATURE_MESSAGE: &str = "Payment verification failed";
pub const ALREADY_PROCESSED_MESSAGE: &str = "Payment already processed";

pub struct PurchaseService;

impl PurchaseService {
    /// Opens a pending purchase at the discounted price.
    #[instrument(skip(stores, buyer, payment_config), fields(buyer_id = %buyer.id))]
    pub async fn checkout(
        stores: &Stores,
        buyer: &User,
        course_id: CourseId,
        payment_config: &PaymentConfig,
    ) -> Result<CheckoutResponse, AppError> {
        let course = stores
            .courses
            .find_course(course_id)
            .await?
            .filter(|course| course.is_published)
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND_MESSAGE)))?;

        if course.educator_id == buyer.id {
            return Err(AppError::validation(anyhow!(OWN_COURSE_MESSAGE)));
        }
        if course.is_enrolled(buyer.id) {
            return Err(AppError::validation(anyhow!(ALREADY_ENROLLED_MESSAGE)));
        }

        let purchase = stores
            .purchases
            .create_purchase(NewPurchase {
                course_id: course.id,
                user_id: buyer.id,
                amount: course.discounted_price(),
                order_id: generate_order_id(),
            })
            .await?;

        info!(
            purchase_id = %purchase.id,
            order_id = %purchase.order_id,
            amount = purchase.amount,
            "Checkout opened"
        );

        Ok(CheckoutResponse {
            success: true,
            purchase,
            key_id: payment_config.key_id.clone(),
            currency: payment_config.currency.clone(),
        })
    }

    /// Checks the gateway signature and settles the purchase. A valid
    /// signature enrolls the buyer; an invalid one marks the purchase failed.
    #[instrument(skip(stores, buyer, dto, payment_config), fields(buyer_id = %buyer.id, order_id = %dto.order_id))]
    pub async fn verify(
        stores: &Stores,
        buyer: &User,
        dto: VerifyPaymentDto,
        payment_config: &PaymentConfig,
    ) -> Result<Purchase, AppError> {
        let purchase = stores
            .purchases
            .find_purchase_by_order(&dto.order_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(PURCHASE_NOT_FOUND_MESSAGE)))?;

        if purchase.user_id != buyer.id {
            warn!(owner_id = %purchase.user_id, "Payment verify on a foreign purchase");
            return Err(AppError::not_owner("You can only verify your own purchase"));
        }

        if !verify_signature(
            &payment_config.key_secret,
            &dto.order_id,
            &dto.payment_id,
            &dto.signature,
        ) {
            warn!("Payment signature mismatch");
            return match stores
                .purchases
                .fail_purchase(&dto.order_id, &dto.payment_id)
                .await?
            {
                Transition::AlreadyProcessed(_) => {
                    Err(AppError::validation(anyhow!(ALREADY_PROCESSED_MESSAGE)))
                }
                _ => Err(AppError::validation(anyhow!(INVALID_SIGNATURE_MESSAGE))),
            };
        }

        match stores
            .purchases
            .complete_purchase(&dto.order_id, &dto.payment_id)
            .await?
        {
            Transition::NotFound => Err(AppError::not_found(anyhow!(PURCHASE_NOT_FOUND_MESSAGE))),
            Transition::AlreadyProcessed(_) => {
                Err(AppError::validation(anyhow!(ALREADY_PROCESSED_MESSAGE)))
            }
            Transition::Applied(purchase) => {
                info!(
                    purchase_id = %purchase.id,
                    course_id = %purchase.course_id,
                    amount = purchase.amount,
                    "Payment verified, buyer enrolled"
                );
                track_purchase_completed(purchase.amount);
                Ok(purchase)
            }
        }
    }
}
