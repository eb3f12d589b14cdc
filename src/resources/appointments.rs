use super::{item, item_action};
use crate::client::ApiClient;
use crate::types::appointment::{
    Appointment, AppointmentFeedback, AppointmentQuery, AppointmentUpdate, FeedbackQuery,
    NewAppointment, NewFeedback, NewStandaloneFeedback,
};
use crate::types::{Acknowledgement, Id, ListResponse};
use crate::Result;

const APPOINTMENTS: &str = "/appointments/";
const FEEDBACK: &str = "/appointment-feedback/";

pub struct Appointments<'a> {
    client: &'a ApiClient,
}

impl<'a> Appointments<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &AppointmentQuery) -> Result<ListResponse<Appointment>> {
        self.client.get_with(APPOINTMENTS, query).await
    }

    pub async fn get(&self, id: Id) -> Result<Appointment> {
        self.client.get(&item(APPOINTMENTS, id)).await
    }

    pub async fn create(&self, appointment: &NewAppointment) -> Result<Appointment> {
        self.client.post(APPOINTMENTS, appointment).await
    }

    pub async fn update(&self, id: Id, update: &AppointmentUpdate) -> Result<Appointment> {
        self.client.patch(&item(APPOINTMENTS, id), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item(APPOINTMENTS, id)).await
    }

    /// Scheduled or confirmed, from today on, soonest first.
    pub async fn upcoming(&self) -> Result<ListResponse<Appointment>> {
        self.client.get("/appointments/upcoming/").await
    }

    /// Today's appointments in any status.
    pub async fn today(&self) -> Result<ListResponse<Appointment>> {
        self.client.get("/appointments/today/").await
    }

    /// Before today, most recent first.
    pub async fn past(&self) -> Result<ListResponse<Appointment>> {
        self.client.get("/appointments/past/").await
    }

    pub async fn add_feedback(&self, id: Id, feedback: &NewFeedback) -> Result<AppointmentFeedback> {
        self.client
            .post(&item_action(APPOINTMENTS, id, "add_feedback"), feedback)
            .await
    }

    /// `NotFound` when the appointment has no feedback yet.
    pub async fn feedback(&self, id: Id) -> Result<AppointmentFeedback> {
        self.client
            .get(&item_action(APPOINTMENTS, id, "feedback"))
            .await
    }

    pub async fn cancel(&self, id: Id) -> Result<Acknowledgement> {
        self.client
            .post_ack(&item_action(APPOINTMENTS, id, "cancel"))
            .await
    }

    pub async fn confirm(&self, id: Id) -> Result<Acknowledgement> {
        self.client
            .post_ack(&item_action(APPOINTMENTS, id, "confirm"))
            .await
    }

    pub async fn complete(&self, id: Id) -> Result<Acknowledgement> {
        self.client
            .post_ack(&item_action(APPOINTMENTS, id, "complete"))
            .await
    }
}

/// The `/appointment-feedback/` collection.
pub struct AppointmentFeedbackApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AppointmentFeedbackApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &FeedbackQuery) -> Result<ListResponse<AppointmentFeedback>> {
        self.client.get_with(FEEDBACK, query).await
    }

    pub async fn get(&self, id: Id) -> Result<AppointmentFeedback> {
        self.client.get(&item(FEEDBACK, id)).await
    }

    pub async fn create(&self, feedback: &NewStandaloneFeedback) -> Result<AppointmentFeedback> {
        self.client.post(FEEDBACK, feedback).await
    }

    pub async fn update(&self, id: Id, feedback: &NewFeedback) -> Result<AppointmentFeedback> {
        self.client.patch(&item(FEEDBACK, id), feedback).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item(FEEDBACK, id)).await
    }
}
