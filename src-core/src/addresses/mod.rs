pub(crate) mod addresses_constants;
pub(crate) mod addresses_model;
pub(crate) mod addresses_repository;
pub(crate) mod addresses_traits;

pub use addresses_constants::*;
pub use addresses_model::{Address, AddressDB, NewAddress, Slope, VerificationStatus};
pub use addresses_repository::AddressRepository;
pub use addresses_traits::AddressRepositoryTrait;
