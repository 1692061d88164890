use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for notifications
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

/// An in-app notification row
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Notification {
            id: db.id,
            user_id: db.user_id,
            kind: db.kind,
            message: db.message,
            is_read: db.is_read,
        }
    }
}

/// Model for creating a new notification
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    pub kind: String,
    pub message: String,
}
