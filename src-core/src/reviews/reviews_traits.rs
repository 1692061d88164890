use async_trait::async_trait;
use rust_decimal::Decimal;

use super::reviews_model::{NewReview, Review};
use crate::errors::Result;

/// Trait defining the contract for review repository operations.
#[async_trait]
pub trait ReviewRepositoryTrait: Send + Sync {
    /// Insert a review. A second review for the same (contractor, booking)
    /// pair fails with a conflict via the store-level unique constraint.
    async fn create_review(&self, new_review: &NewReview) -> Result<Review>;

    fn get_contractor_reviews(&self, contractor_id: &str) -> Result<Vec<Review>>;

    /// (average rating, review count) over all of a contractor's reviews.
    fn rating_aggregates(&self, contractor_id: &str) -> Result<(Decimal, i64)>;
}

/// Trait defining the contract for review service operations.
#[async_trait]
pub trait ReviewServiceTrait: Send + Sync {
    async fn create_review(&self, new_review: NewReview) -> Result<Review>;
    fn get_contractor_reviews(&self, contractor_id: &str) -> Result<Vec<Review>>;
}
