use super::exercises::PROGRESS_STATS;
use crate::client::ApiClient;
use crate::types::analytics::{Adherence, AdherenceQuery, ProgressStats, UserStats};
use crate::types::Id;
use crate::Result;

/// Dashboard figures. Read-only views over the stats endpoints.
pub struct Analytics<'a> {
    client: &'a ApiClient,
}

impl<'a> Analytics<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn user_stats(&self) -> Result<UserStats> {
        self.client.get("/users/stats/").await
    }

    pub async fn progress_stats(&self) -> Result<ProgressStats> {
        self.client.get(PROGRESS_STATS).await
    }

    pub async fn patient_adherence(&self, patient: Id) -> Result<Adherence> {
        let stats: ProgressStats = self
            .client
            .get_with(PROGRESS_STATS, &AdherenceQuery { patient })
            .await?;
        Ok(Adherence { patient, stats })
    }
}
