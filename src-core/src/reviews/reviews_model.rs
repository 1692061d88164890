use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for reviews
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ReviewDB {
    pub id: String,
    pub contractor_id: String,
    pub booking_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A customer's review of a completed job.
/// At most one review exists per (contractor, booking).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub contractor_id: String,
    pub booking_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

impl From<ReviewDB> for Review {
    fn from(db: ReviewDB) -> Self {
        Review {
            id: db.id,
            contractor_id: db.contractor_id,
            booking_id: db.booking_id,
            rating: db.rating,
            comment: db.comment,
        }
    }
}

/// Model for creating a new review
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub contractor_id: String,
    pub booking_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}
