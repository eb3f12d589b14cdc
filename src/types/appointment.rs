use super::user::User;
use super::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Statuses that count as "upcoming".
    pub const OPEN: [AppointmentStatus; 2] =
        [AppointmentStatus::Scheduled, AppointmentStatus::Confirmed];

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }
}

/// A participant as the backend renders it: nested on reads, a bare id on
/// create/update echoes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(Id),
    User(Box<User>),
}

impl UserRef {
    pub fn id(&self) -> Id {
        match self {
            UserRef::Id(id) => *id,
            UserRef::User(user) => user.id,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            UserRef::Id(_) => None,
            UserRef::User(user) => Some(user),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub patient: Option<UserRef>,
    pub physiotherapist: UserRef,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM[:SS]`
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Scheduled
}

/// Filters for `GET /appointments/`.
///
/// The backend matches `status`, `date`, `physiotherapist` and `patient`
/// exactly, one value each. Status sets and date ranges are served by
/// [`Appointments::upcoming`](crate::resources::Appointments::upcoming) and
/// [`Appointments::past`](crate::resources::Appointments::past).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentQuery {
    /// Matched against `reason` and `notes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physiotherapist: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Id>,
    /// `date`, `start_time` or `created_at`, `-` prefix for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

impl AppointmentQuery {
    /// Appointments in one status, soonest first.
    pub fn with_status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ordering: Some("date,start_time".to_string()),
            ..Self::default()
        }
    }
}

/// `POST /appointments/`; the patient is the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub physiotherapist: Id,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentFeedback {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub appointment: Option<Id>,
    /// 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFeedback {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// `POST /appointment-feedback/` names the appointment in the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStandaloneFeedback {
    pub appointment: Id,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedbackQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}
