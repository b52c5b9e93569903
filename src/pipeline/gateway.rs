//! Payment gateway collaborator - the external authorizer of charges.
//!
//! The pipeline does not speak any gateway protocol; it only needs a yes/no
//! answer for an amount, with decline reasons reported as text. Deployments
//! plug in a real client; tests and the default wiring use [`StaticGateway`].

use async_trait::async_trait;

/// External payment authorizer.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempts to authorize a charge for `amount` dollars.
    ///
    /// A decline carries the gateway's reason; the payment stage maps it to
    /// `Error::PaymentFailed`.
    async fn authorize(&self, amount: f64) -> std::result::Result<(), String>;
}

/// Gateway with fixed behavior: authorizes everything, optionally declining
/// charges above a ceiling.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticGateway {
    decline_over: Option<f64>,
}

impl StaticGateway {
    /// A gateway that authorizes every charge.
    pub fn approving() -> Self {
        Self { decline_over: None }
    }

    /// A gateway that declines any charge strictly above `limit`.
    pub fn declining_over(limit: f64) -> Self {
        Self {
            decline_over: Some(limit),
        }
    }
}

#[async_trait]
impl PaymentGateway for StaticGateway {
    async fn authorize(&self, amount: f64) -> std::result::Result<(), String> {
        if let Some(limit) = self.decline_over {
            if amount > limit {
                return Err(format!(
                    "charge of {amount:.2} exceeds authorization limit of {limit:.2}"
                ));
            }
        }
        Ok(())
    }
}
