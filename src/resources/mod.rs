//! Typed resource handles.
//!
//! Each handle borrows the client and maps one UI intent to one REST call:
//! it fixes the path and verb and shapes the query. No business logic lives
//! here; auth, retries and error normalization come from the executor.
//!
//! ```rust,no_run
//! # async fn demo(client: physio_client::ApiClient) -> physio_client::Result<()> {
//! use physio_client::types::appointment::{AppointmentQuery, AppointmentStatus};
//!
//! let upcoming = client.appointments().upcoming().await?;
//! let cancelled = client
//!     .appointments()
//!     .list(&AppointmentQuery {
//!         status: Some(AppointmentStatus::Cancelled),
//!         ordering: Some("-date".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! # let _ = (upcoming, cancelled);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod appointments;
pub mod books;
pub mod chat;
pub mod exercises;
pub mod notifications;
pub mod users;

pub use analytics::Analytics;
pub use appointments::{AppointmentFeedbackApi, Appointments};
pub use books::Books;
pub use chat::Chat;
pub use exercises::{ExercisePlanItems, ExercisePlans, ExerciseProgressApi, Exercises};
pub use notifications::Notifications;
pub use users::{Profiles, Users};

use crate::client::ApiClient;
use crate::types::Id;

/// `/{collection}/{id}/`
pub(crate) fn item(collection: &str, id: Id) -> String {
    format!("{}{}/", collection, id)
}

/// `/{collection}/{id}/{action}/`
pub(crate) fn item_action(collection: &str, id: Id, action: &str) -> String {
    format!("{}{}/{}/", collection, id, action)
}

impl ApiClient {
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn profiles(&self) -> Profiles<'_> {
        Profiles::new(self)
    }

    pub fn appointments(&self) -> Appointments<'_> {
        Appointments::new(self)
    }

    pub fn appointment_feedback(&self) -> AppointmentFeedbackApi<'_> {
        AppointmentFeedbackApi::new(self)
    }

    pub fn exercises(&self) -> Exercises<'_> {
        Exercises::new(self)
    }

    pub fn exercise_plans(&self) -> ExercisePlans<'_> {
        ExercisePlans::new(self)
    }

    pub fn exercise_plan_items(&self) -> ExercisePlanItems<'_> {
        ExercisePlanItems::new(self)
    }

    pub fn exercise_progress(&self) -> ExerciseProgressApi<'_> {
        ExerciseProgressApi::new(self)
    }

    pub fn books(&self) -> Books<'_> {
        Books::new(self)
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(self)
    }

    pub fn chat(&self) -> Chat<'_> {
        Chat::new(self)
    }

    pub fn analytics(&self) -> Analytics<'_> {
        Analytics::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(item("/books/", 3), "/books/3/");
        assert_eq!(item_action("/books/", 3, "bookmark"), "/books/3/bookmark/");
    }
}
