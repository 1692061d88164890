use super::pricing_model::{PricingSetting, PricingSnapshot};
use crate::errors::Result;

/// Trait defining the contract for pricing configuration reads.
///
/// The settlement core never mutates pricing rows; configuration
/// administration is a separate surface.
pub trait PricingSettingRepositoryTrait: Send + Sync {
    fn get_settings(&self) -> Result<Vec<PricingSetting>>;
    fn load_snapshot(&self) -> Result<PricingSnapshot>;
}
