use diesel::prelude::*;
use std::sync::Arc;

use super::pricing_model::{PricingSetting, PricingSnapshot};
use super::pricing_traits::PricingSettingRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};

pub struct PricingSettingRepository {
    pool: Arc<DbPool>,
}

impl PricingSettingRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PricingSettingRepository { pool }
    }
}

impl PricingSettingRepositoryTrait for PricingSettingRepository {
    fn get_settings(&self) -> Result<Vec<PricingSetting>> {
        use crate::schema::pricing_settings;
        let mut conn = get_connection(&self.pool)?;
        pricing_settings::table
            .load(&mut conn)
            .map_err(Error::from)
    }

    fn load_snapshot(&self) -> Result<PricingSnapshot> {
        Ok(PricingSnapshot::new(&self.get_settings()?))
    }
}
