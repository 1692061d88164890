use async_trait::async_trait;
use rust_decimal::Decimal;

use super::contractors_model::{Contractor, Tier, TierPromotion};
use crate::errors::Result;

/// Trait defining the contract for contractor repository operations.
#[async_trait]
pub trait ContractorRepositoryTrait: Send + Sync {
    fn get_contractor(&self, contractor_id: &str) -> Result<Contractor>;
    fn get_by_user_id(&self, user_id: &str) -> Result<Contractor>;

    /// Active, approved contractors considered by the promotion pass.
    fn list_promotion_candidates(&self) -> Result<Vec<Contractor>>;

    async fn set_tier(&self, contractor_id: &str, tier: Tier) -> Result<()>;
    async fn set_payment_account(&self, contractor_id: &str, account_ref: &str) -> Result<()>;

    /// Update the cached account state from a provider webhook.
    /// Returns the number of matched contractor rows.
    async fn set_account_state(&self, account_ref: &str, payouts_enabled: bool) -> Result<usize>;

    async fn update_rating_aggregates(
        &self,
        contractor_id: &str,
        average_rating: Decimal,
        total_ratings_count: i64,
    ) -> Result<()>;
}

/// Trait defining the contract for contractor service operations.
#[async_trait]
pub trait ContractorServiceTrait: Send + Sync {
    fn get_contractor(&self, contractor_id: &str) -> Result<Contractor>;
    fn get_by_user_id(&self, user_id: &str) -> Result<Contractor>;

    /// Scheduled batch pass promoting every eligible contractor by at most
    /// one tier. Safe to re-run arbitrarily often.
    async fn run_tier_promotions(&self) -> Result<Vec<TierPromotion>>;
}
