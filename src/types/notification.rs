use super::user::User;
use super::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Appointment,
    Message,
    Exercise,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    #[serde(default)]
    pub recipient: Option<User>,
    pub notification_type: NotificationType,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub related_object_id: Option<Id>,
    #[serde(default)]
    pub related_object_type: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Filters for `GET /notifications/`. The type filter is sent under the
/// backend's field name, `notification_type`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default = "yes")]
    pub email_notifications: bool,
    #[serde(default = "yes")]
    pub push_notifications: bool,
    #[serde(default = "yes")]
    pub appointment_reminders: bool,
    #[serde(default = "yes")]
    pub message_notifications: bool,
    #[serde(default = "yes")]
    pub exercise_reminders: bool,
    #[serde(default = "yes")]
    pub system_notifications: bool,
}

fn yes() -> bool {
    true
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            id: None,
            email_notifications: true,
            push_notifications: true,
            appointment_reminders: true,
            message_notifications: true,
            exercise_reminders: true,
            system_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_reminders: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_reminders: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_notifications: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preferences_default_on() {
        let prefs: NotificationPreferences =
            serde_json::from_value(json!({"id": 1, "push_notifications": false})).unwrap();
        assert!(!prefs.push_notifications);
        assert!(prefs.email_notifications);
        assert!(prefs.system_notifications);
    }
}
