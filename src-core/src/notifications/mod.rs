pub(crate) mod email_sender;
pub(crate) mod notifications_constants;
pub(crate) mod notifications_model;
pub(crate) mod notifications_repository;
pub(crate) mod notifications_service;
pub(crate) mod notifications_traits;

pub use email_sender::{LogMailer, WebhookMailer};
pub use notifications_constants::*;
pub use notifications_model::{NewNotification, Notification, NotificationDB};
pub use notifications_repository::NotificationRepository;
pub use notifications_service::NotificationService;
pub use notifications_traits::{
    EmailSenderTrait, NotificationRepositoryTrait, NotificationServiceTrait,
};
