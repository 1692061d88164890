use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::notifications_model::{NewNotification, Notification, NotificationDB};
use super::notifications_traits::NotificationRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;

pub struct NotificationRepository {
    pool: Arc<DbPool>,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        NotificationRepository { pool }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn create_notification(
        &self,
        new_notification: &NewNotification,
    ) -> Result<Notification> {
        use crate::schema::notifications;
        let mut conn = get_connection(&self.pool)?;

        let new_notification_record = (
            notifications::id.eq(Uuid::new_v4().to_string()),
            notifications::user_id.eq(&new_notification.user_id),
            notifications::kind.eq(&new_notification.kind),
            notifications::message.eq(&new_notification.message),
            notifications::is_read.eq(false),
            notifications::created_at.eq(Utc::now().naive_utc()),
        );

        let db: NotificationDB = diesel::insert_into(notifications::table)
            .values(new_notification_record)
            .get_result(&mut conn)?;
        Ok(db.into())
    }

    fn get_user_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        use crate::schema::notifications;
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<NotificationDB> = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .order(notifications::created_at.desc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(&self, notification_id: &str) -> Result<()> {
        use crate::schema::notifications;
        let mut conn = get_connection(&self.pool)?;
        diesel::update(notifications::table.find(notification_id))
            .set(notifications::is_read.eq(true))
            .execute(&mut conn)?;
        Ok(())
    }
}
