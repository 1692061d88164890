use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::disputes_model::{Dispute, DisputeDB, NewDispute};
use super::disputes_traits::DisputeRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};

pub struct DisputeRepository {
    pool: Arc<DbPool>,
}

impl DisputeRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        DisputeRepository { pool }
    }
}

#[async_trait]
impl DisputeRepositoryTrait for DisputeRepository {
    async fn open_dispute(&self, new_dispute: &NewDispute) -> Result<Dispute> {
        use crate::schema::disputes;
        let mut conn = get_connection(&self.pool)?;

        let new_dispute_record = (
            disputes::id.eq(Uuid::new_v4().to_string()),
            disputes::booking_id.eq(&new_dispute.booking_id),
            disputes::reason.eq(&new_dispute.reason),
            disputes::created_at.eq(Utc::now().naive_utc()),
        );

        let db: DisputeDB = diesel::insert_into(disputes::table)
            .values(new_dispute_record)
            .get_result(&mut conn)?;
        Ok(db.into())
    }

    fn count_for_bookings(&self, booking_ids: &[String]) -> Result<i64> {
        use crate::schema::disputes;
        if booking_ids.is_empty() {
            return Ok(0);
        }
        let mut conn = get_connection(&self.pool)?;
        disputes::table
            .filter(disputes::booking_id.eq_any(booking_ids))
            .count()
            .get_result(&mut conn)
            .map_err(Error::from)
    }
}
