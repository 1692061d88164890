use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for disputes
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::disputes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DisputeDB {
    pub id: String,
    pub booking_id: String,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A dispute marks its booking as contested. The marker is informational:
/// it feeds the tier evaluator's dispute rate and never blocks a booking
/// from completing.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: String,
    pub booking_id: String,
    pub reason: Option<String>,
}

impl From<DisputeDB> for Dispute {
    fn from(db: DisputeDB) -> Self {
        Dispute {
            id: db.id,
            booking_id: db.booking_id,
            reason: db.reason,
        }
    }
}

/// Model for opening a dispute
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewDispute {
    pub booking_id: String,
    pub reason: Option<String>,
}
