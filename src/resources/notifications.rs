use super::{item, item_action};
use crate::client::ApiClient;
use crate::error_kind::ApiErrorKind;
use crate::types::notification::{
    Notification, NotificationPreferences, NotificationQuery, NotificationUpdate,
    PreferencesUpdate,
};
use crate::types::{Acknowledgement, Id, ListResponse};
use crate::{ApiError, ErrorContext, Result};

const NOTIFICATIONS: &str = "/notifications/";
const PREFERENCES: &str = "/notification-preferences/";

pub struct Notifications<'a> {
    client: &'a ApiClient,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &NotificationQuery) -> Result<ListResponse<Notification>> {
        self.client.get_with(NOTIFICATIONS, query).await
    }

    pub async fn get(&self, id: Id) -> Result<Notification> {
        self.client.get(&item(NOTIFICATIONS, id)).await
    }

    pub async fn update(&self, id: Id, update: &NotificationUpdate) -> Result<Notification> {
        self.client.patch(&item(NOTIFICATIONS, id), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item(NOTIFICATIONS, id)).await
    }

    pub async fn unread(&self) -> Result<ListResponse<Notification>> {
        self.client.get("/notifications/unread/").await
    }

    pub async fn mark_read(&self, id: Id) -> Result<Acknowledgement> {
        self.client
            .post_ack(&item_action(NOTIFICATIONS, id, "mark_read"))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<Acknowledgement> {
        self.client.post_ack("/notifications/mark_all_read/").await
    }

    /// The caller's preferences. The collection is scoped to the caller, so
    /// the first row is theirs; `NotFound` when none exists yet.
    pub async fn preferences(&self) -> Result<NotificationPreferences> {
        let list: ListResponse<NotificationPreferences> = self.client.get(PREFERENCES).await?;
        list.into_items().into_iter().next().ok_or_else(|| {
            ApiError::new(ApiErrorKind::NotFound, "No notification preferences stored")
                .with_context(
                    ErrorContext::new()
                        .with_endpoint(PREFERENCES)
                        .with_source("notifications"),
                )
                .into()
        })
    }

    /// Patch the caller's preferences, creating the row on first use.
    pub async fn update_preferences(
        &self,
        update: &PreferencesUpdate,
    ) -> Result<NotificationPreferences> {
        let list: ListResponse<NotificationPreferences> = self.client.get(PREFERENCES).await?;
        match list.into_items().into_iter().find_map(|p| p.id) {
            Some(id) => self.client.patch(&item(PREFERENCES, id), update).await,
            None => self.client.post(PREFERENCES, update).await,
        }
    }
}
