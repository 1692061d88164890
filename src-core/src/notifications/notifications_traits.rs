use async_trait::async_trait;

use super::notifications_model::{NewNotification, Notification};
use crate::errors::Result;

/// Trait defining the contract for notification repository operations.
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    async fn create_notification(&self, new_notification: &NewNotification)
        -> Result<Notification>;
    fn get_user_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;
    async fn mark_read(&self, notification_id: &str) -> Result<()>;
}

/// Trait for delivering outbound messages (email or equivalent relay).
/// Delivery is best-effort everywhere this is used.
#[async_trait]
pub trait EmailSenderTrait: Send + Sync {
    async fn send(&self, user_id: &str, subject: &str, body: &str) -> Result<()>;
}

/// Trait defining the contract for notification service operations.
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Insert the in-app row and send the outbound message. The outbound
    /// failure is swallowed; the insert failure is returned.
    async fn notify(&self, user_id: &str, kind: &str, message: &str) -> Result<Notification>;

    /// Fire-and-forget variant used on settlement paths: delivery runs on
    /// the runtime, failures are logged, and the caller is never blocked.
    fn notify_detached(&self, user_id: &str, kind: &str, message: &str);
}
