pub(crate) mod contractors_constants;
pub(crate) mod contractors_model;
pub(crate) mod contractors_repository;
pub(crate) mod contractors_service;
pub(crate) mod contractors_traits;

#[cfg(test)]
mod tier_evaluator_tests;

pub use contractors_constants::*;
pub use contractors_model::{
    ApprovalStatus, Contractor, ContractorDB, Tier, TierPromotion,
};
pub use contractors_repository::ContractorRepository;
pub use contractors_service::ContractorService;
pub use contractors_traits::{ContractorRepositoryTrait, ContractorServiceTrait};
