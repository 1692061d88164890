pub(crate) mod payouts_errors;
pub(crate) mod payouts_model;
pub(crate) mod payouts_service;
pub(crate) mod payouts_traits;
pub mod providers;

#[cfg(test)]
mod payouts_service_tests;

pub use payouts_errors::PayoutError;
pub use payouts_model::{
    PaymentAccountEvent, PaymentAccountStatus, PayoutRelease, PayoutRetryOutcome,
};
pub use payouts_service::PayoutService;
pub use payouts_traits::{PaymentProviderTrait, PayoutServiceTrait};
