use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::reviews_model::{NewReview, Review};
use super::reviews_traits::{ReviewRepositoryTrait, ReviewServiceTrait};
use crate::contractors::ContractorRepositoryTrait;
use crate::errors::{Result, ValidationError};

pub struct ReviewService {
    review_repository: Arc<dyn ReviewRepositoryTrait>,
    contractor_repository: Arc<dyn ContractorRepositoryTrait>,
}

impl ReviewService {
    pub fn new(
        review_repository: Arc<dyn ReviewRepositoryTrait>,
        contractor_repository: Arc<dyn ContractorRepositoryTrait>,
    ) -> Self {
        Self {
            review_repository,
            contractor_repository,
        }
    }
}

#[async_trait]
impl ReviewServiceTrait for ReviewService {
    async fn create_review(&self, new_review: NewReview) -> Result<Review> {
        if !(1..=5).contains(&new_review.rating) {
            return Err(ValidationError::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                new_review.rating
            ))
            .into());
        }

        let review = self.review_repository.create_review(&new_review).await?;

        let (average_rating, total_ratings_count) = self
            .review_repository
            .rating_aggregates(&new_review.contractor_id)?;
        self.contractor_repository
            .update_rating_aggregates(
                &new_review.contractor_id,
                average_rating,
                total_ratings_count,
            )
            .await?;
        debug!(
            "Contractor {} now averages {} over {} reviews",
            new_review.contractor_id, average_rating, total_ratings_count
        );

        Ok(review)
    }

    fn get_contractor_reviews(&self, contractor_id: &str) -> Result<Vec<Review>> {
        self.review_repository.get_contractor_reviews(contractor_id)
    }
}
