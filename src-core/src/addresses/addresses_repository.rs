use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::addresses_model::{Address, AddressDB, NewAddress, VerificationStatus};
use super::addresses_traits::AddressRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;

pub struct AddressRepository {
    pool: Arc<DbPool>,
}

impl AddressRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        AddressRepository { pool }
    }
}

#[async_trait]
impl AddressRepositoryTrait for AddressRepository {
    fn get_address(&self, address_id: &str) -> Result<Address> {
        use crate::schema::addresses;
        let mut conn = get_connection(&self.pool)?;
        let db: AddressDB = addresses::table.find(address_id).first(&mut conn)?;
        db.try_into()
    }

    fn get_user_address(&self, address_id: &str, user_id: &str) -> Result<Option<Address>> {
        use crate::schema::addresses;
        let mut conn = get_connection(&self.pool)?;
        let db: Option<AddressDB> = addresses::table
            .filter(addresses::id.eq(address_id))
            .filter(addresses::user_id.eq(user_id))
            .first(&mut conn)
            .optional()?;
        db.map(Address::try_from).transpose()
    }

    async fn create_address(&self, new_address: NewAddress) -> Result<Address> {
        use crate::schema::addresses;
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();

        let new_address_record = (
            addresses::id.eq(Uuid::new_v4().to_string()),
            addresses::user_id.eq(new_address.user_id),
            addresses::street_line.eq(new_address.street_line),
            addresses::square_meters.eq(new_address.square_meters.map(|v| v.to_string())),
            addresses::slope.eq(new_address.slope.as_str()),
            addresses::tier_count.eq(new_address.tier_count),
            addresses::verification_status.eq(VerificationStatus::Pending.as_str()),
            addresses::created_at.eq(now),
            addresses::updated_at.eq(now),
        );

        let db: AddressDB = diesel::insert_into(addresses::table)
            .values(new_address_record)
            .get_result(&mut conn)?;
        db.try_into()
    }

    async fn set_verification_status(
        &self,
        address_id: &str,
        status: VerificationStatus,
    ) -> Result<Address> {
        use crate::schema::addresses;
        let mut conn = get_connection(&self.pool)?;

        let db: AddressDB = diesel::update(addresses::table.find(address_id))
            .set((
                addresses::verification_status.eq(status.as_str()),
                addresses::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result(&mut conn)?;
        db.try_into()
    }
}
