use super::item;
use crate::client::ApiClient;
use crate::types::analytics::UserStats;
use crate::types::user::{
    PatientProfile, PatientProfileUpdate, PhysiotherapistProfile, PhysiotherapistProfileUpdate,
    ProfileUpdateResponse, User, UserQuery, UserUpdate,
};
use crate::types::{Id, ListResponse};
use crate::Result;

const USERS: &str = "/users/";
const PATIENT_PROFILE: &str = "/auth/patient-profile/";
const PHYSIOTHERAPIST_PROFILE: &str = "/auth/physiotherapist-profile/";

pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &UserQuery) -> Result<ListResponse<User>> {
        self.client.get_with(USERS, query).await
    }

    pub async fn get(&self, id: Id) -> Result<User> {
        self.client.get(&item(USERS, id)).await
    }

    pub async fn update(&self, id: Id, update: &UserUpdate) -> Result<User> {
        self.client.patch(&item(USERS, id), update).await
    }

    /// The signed-in account.
    pub async fn me(&self) -> Result<User> {
        self.client.get("/users/me/").await
    }

    pub async fn physiotherapists(&self) -> Result<ListResponse<User>> {
        self.client.get("/users/physiotherapists/").await
    }

    /// Physiotherapist profiles currently taking appointments, best rated first.
    pub async fn available_physiotherapists(
        &self,
    ) -> Result<ListResponse<PhysiotherapistProfile>> {
        self.client.get("/physiotherapists/available/").await
    }

    /// Staff only; others get `AccessDenied`.
    pub async fn stats(&self) -> Result<UserStats> {
        self.client.get("/users/stats/").await
    }
}

/// The caller's own patient or physiotherapist profile.
pub struct Profiles<'a> {
    client: &'a ApiClient,
}

impl<'a> Profiles<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn patient(&self) -> Result<PatientProfile> {
        self.client.get(PATIENT_PROFILE).await
    }

    pub async fn update_patient(
        &self,
        update: &PatientProfileUpdate,
    ) -> Result<ProfileUpdateResponse<PatientProfile>> {
        self.client.put(PATIENT_PROFILE, update).await
    }

    pub async fn physiotherapist(&self) -> Result<PhysiotherapistProfile> {
        self.client.get(PHYSIOTHERAPIST_PROFILE).await
    }

    pub async fn update_physiotherapist(
        &self,
        update: &PhysiotherapistProfileUpdate,
    ) -> Result<ProfileUpdateResponse<PhysiotherapistProfile>> {
        self.client.put(PHYSIOTHERAPIST_PROFILE, update).await
    }
}
