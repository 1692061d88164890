use async_trait::async_trait;

use super::addresses_model::{Address, NewAddress, VerificationStatus};
use crate::errors::Result;

/// Trait defining the contract for address repository operations.
#[async_trait]
pub trait AddressRepositoryTrait: Send + Sync {
    fn get_address(&self, address_id: &str) -> Result<Address>;

    /// Fetch an address only if it belongs to the given user.
    /// Returns `None` both for a missing row and for someone else's row,
    /// so callers cannot distinguish the two.
    fn get_user_address(&self, address_id: &str, user_id: &str) -> Result<Option<Address>>;

    async fn create_address(&self, new_address: NewAddress) -> Result<Address>;

    async fn set_verification_status(
        &self,
        address_id: &str,
        status: VerificationStatus,
    ) -> Result<Address>;
}
