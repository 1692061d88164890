use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::reviews_model::{NewReview, Review, ReviewDB};
use super::reviews_traits::ReviewRepositoryTrait;
use crate::constants::RATING_DECIMAL_PRECISION;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;

pub struct ReviewRepository {
    pool: Arc<DbPool>,
}

impl ReviewRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ReviewRepository { pool }
    }
}

#[async_trait]
impl ReviewRepositoryTrait for ReviewRepository {
    async fn create_review(&self, new_review: &NewReview) -> Result<Review> {
        use crate::schema::reviews;
        let mut conn = get_connection(&self.pool)?;

        let new_review_record = (
            reviews::id.eq(Uuid::new_v4().to_string()),
            reviews::contractor_id.eq(&new_review.contractor_id),
            reviews::booking_id.eq(&new_review.booking_id),
            reviews::rating.eq(new_review.rating),
            reviews::comment.eq(&new_review.comment),
            reviews::created_at.eq(Utc::now().naive_utc()),
        );

        let db: ReviewDB = diesel::insert_into(reviews::table)
            .values(new_review_record)
            .get_result(&mut conn)?;
        Ok(db.into())
    }

    fn get_contractor_reviews(&self, contractor_id: &str) -> Result<Vec<Review>> {
        use crate::schema::reviews;
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<ReviewDB> = reviews::table
            .filter(reviews::contractor_id.eq(contractor_id))
            .order(reviews::created_at.desc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn rating_aggregates(&self, contractor_id: &str) -> Result<(Decimal, i64)> {
        use crate::schema::reviews;
        let mut conn = get_connection(&self.pool)?;
        let ratings: Vec<i32> = reviews::table
            .filter(reviews::contractor_id.eq(contractor_id))
            .select(reviews::rating)
            .load(&mut conn)?;

        if ratings.is_empty() {
            return Ok((Decimal::ZERO, 0));
        }

        let count = ratings.len() as i64;
        let sum: i64 = ratings.iter().map(|rating| *rating as i64).sum();
        let average =
            (Decimal::from(sum) / Decimal::from(count)).round_dp(RATING_DECIMAL_PRECISION);
        Ok((average, count))
    }
}
