pub(crate) mod reviews_model;
pub(crate) mod reviews_repository;
pub(crate) mod reviews_service;
pub(crate) mod reviews_traits;

pub use reviews_model::{NewReview, Review, ReviewDB};
pub use reviews_repository::ReviewRepository;
pub use reviews_service::ReviewService;
pub use reviews_traits::{ReviewRepositoryTrait, ReviewServiceTrait};
