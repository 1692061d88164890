use async_trait::async_trait;

use super::disputes_model::{Dispute, NewDispute};
use crate::errors::Result;

/// Trait defining the contract for dispute repository operations.
#[async_trait]
pub trait DisputeRepositoryTrait: Send + Sync {
    /// Open a dispute. A booking can be disputed at most once; a second
    /// open fails with a conflict via the unique constraint.
    async fn open_dispute(&self, new_dispute: &NewDispute) -> Result<Dispute>;

    /// Number of disputes among the given bookings.
    fn count_for_bookings(&self, booking_ids: &[String]) -> Result<i64>;
}

/// Trait defining the contract for dispute service operations.
#[async_trait]
pub trait DisputeServiceTrait: Send + Sync {
    async fn open_dispute(
        &self,
        user_id: &str,
        booking_id: &str,
        reason: Option<String>,
    ) -> Result<Dispute>;
}
