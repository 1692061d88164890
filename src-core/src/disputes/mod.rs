pub(crate) mod disputes_model;
pub(crate) mod disputes_repository;
pub(crate) mod disputes_service;
pub(crate) mod disputes_traits;

pub use disputes_model::{Dispute, DisputeDB, NewDispute};
pub use disputes_repository::DisputeRepository;
pub use disputes_service::DisputeService;
pub use disputes_traits::{DisputeRepositoryTrait, DisputeServiceTrait};
