use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::contractors_constants::APPROVAL_STATUS_APPROVED;
use super::contractors_model::{Contractor, ContractorDB, Tier};
use super::contractors_traits::ContractorRepositoryTrait;
use crate::constants::RATING_DECIMAL_PRECISION;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;

pub struct ContractorRepository {
    pool: Arc<DbPool>,
}

impl ContractorRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ContractorRepository { pool }
    }
}

#[async_trait]
impl ContractorRepositoryTrait for ContractorRepository {
    fn get_contractor(&self, contractor_id: &str) -> Result<Contractor> {
        use crate::schema::contractors;
        let mut conn = get_connection(&self.pool)?;
        let db: ContractorDB = contractors::table.find(contractor_id).first(&mut conn)?;
        db.try_into()
    }

    fn get_by_user_id(&self, user_id: &str) -> Result<Contractor> {
        use crate::schema::contractors;
        let mut conn = get_connection(&self.pool)?;
        let db: ContractorDB = contractors::table
            .filter(contractors::user_id.eq(user_id))
            .first(&mut conn)?;
        db.try_into()
    }

    fn list_promotion_candidates(&self) -> Result<Vec<Contractor>> {
        use crate::schema::contractors;
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<ContractorDB> = contractors::table
            .filter(contractors::is_active.eq(true))
            .filter(contractors::approval_status.eq(APPROVAL_STATUS_APPROVED))
            .load(&mut conn)?;
        rows.into_iter().map(Contractor::try_from).collect()
    }

    async fn set_tier(&self, contractor_id: &str, tier: Tier) -> Result<()> {
        use crate::schema::contractors;
        let mut conn = get_connection(&self.pool)?;
        diesel::update(contractors::table.find(contractor_id))
            .set((
                contractors::tier.eq(tier.as_str()),
                contractors::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn set_payment_account(&self, contractor_id: &str, account_ref: &str) -> Result<()> {
        use crate::schema::contractors;
        let mut conn = get_connection(&self.pool)?;
        diesel::update(contractors::table.find(contractor_id))
            .set((
                contractors::payment_account_ref.eq(account_ref),
                contractors::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn set_account_state(&self, account_ref: &str, payouts_enabled: bool) -> Result<usize> {
        use crate::schema::contractors;
        let mut conn = get_connection(&self.pool)?;
        let matched = diesel::update(
            contractors::table.filter(contractors::payment_account_ref.eq(account_ref)),
        )
        .set((
            contractors::payouts_enabled.eq(payouts_enabled),
            contractors::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;
        Ok(matched)
    }

    async fn update_rating_aggregates(
        &self,
        contractor_id: &str,
        average_rating: Decimal,
        total_ratings_count: i64,
    ) -> Result<()> {
        use crate::schema::contractors;
        let mut conn = get_connection(&self.pool)?;
        diesel::update(contractors::table.find(contractor_id))
            .set((
                contractors::average_rating
                    .eq(average_rating.round_dp(RATING_DECIMAL_PRECISION).to_string()),
                contractors::total_ratings_count.eq(total_ratings_count as i32),
                contractors::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(())
    }
}
