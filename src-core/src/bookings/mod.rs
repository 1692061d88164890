pub(crate) mod bookings_constants;
pub(crate) mod bookings_model;
pub(crate) mod bookings_repository;
pub(crate) mod bookings_service;
pub(crate) mod bookings_traits;


pub use bookings_constants::*;
pub use bookings_model::{
    ApproveJobRequest, Booking, BookingDB, BookingStatus, GrassLength, NewBookingRequest,
    PayoutClaim, PayoutStatus,
};
pub use bookings_repository::BookingRepository;
pub use bookings_service::BookingService;
pub use bookings_traits::{BookingRepositoryTrait, BookingServiceTrait};
