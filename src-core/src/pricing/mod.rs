pub(crate) mod pricing_constants;
pub(crate) mod pricing_model;
pub(crate) mod pricing_repository;
pub(crate) mod pricing_traits;

pub use pricing_constants::*;
pub use pricing_model::{NewPricingSetting, PricingSetting, PricingSnapshot};
pub use pricing_repository::PricingSettingRepository;
pub use pricing_traits::PricingSettingRepositoryTrait;
