use async_trait::async_trait;
use log::{error, warn};
use std::sync::Arc;

use super::notifications_model::{NewNotification, Notification};
use super::notifications_traits::{
    EmailSenderTrait, NotificationRepositoryTrait, NotificationServiceTrait,
};
use crate::errors::Result;

pub struct NotificationService {
    notification_repository: Arc<dyn NotificationRepositoryTrait>,
    email_sender: Arc<dyn EmailSenderTrait>,
}

impl NotificationService {
    pub fn new(
        notification_repository: Arc<dyn NotificationRepositoryTrait>,
        email_sender: Arc<dyn EmailSenderTrait>,
    ) -> Self {
        Self {
            notification_repository,
            email_sender,
        }
    }

    async fn deliver(
        notification_repository: Arc<dyn NotificationRepositoryTrait>,
        email_sender: Arc<dyn EmailSenderTrait>,
        user_id: String,
        kind: String,
        message: String,
    ) -> Result<Notification> {
        let new_notification = NewNotification {
            user_id: user_id.clone(),
            kind: kind.clone(),
            message: message.clone(),
        };
        let insert = notification_repository.create_notification(&new_notification);
        let outbound = email_sender.send(&user_id, &kind, &message);

        // The two side effects are independent; neither waits on the other.
        let (inserted, sent) = futures::join!(insert, outbound);
        if let Err(e) = sent {
            warn!("Outbound message to {} failed: {}", user_id, e);
        }
        inserted
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify(&self, user_id: &str, kind: &str, message: &str) -> Result<Notification> {
        Self::deliver(
            Arc::clone(&self.notification_repository),
            Arc::clone(&self.email_sender),
            user_id.to_string(),
            kind.to_string(),
            message.to_string(),
        )
        .await
    }

    fn notify_detached(&self, user_id: &str, kind: &str, message: &str) {
        let notification_repository = Arc::clone(&self.notification_repository);
        let email_sender = Arc::clone(&self.email_sender);
        let user_id = user_id.to_string();
        let kind = kind.to_string();
        let message = message.to_string();

        tokio::spawn(async move {
            if let Err(e) =
                Self::deliver(notification_repository, email_sender, user_id, kind, message).await
            {
                error!("Detached notification delivery failed: {}", e);
            }
        });
    }
}
