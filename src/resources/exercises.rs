use super::{item, item_action};
use crate::client::ApiClient;
use crate::types::analytics::ProgressStats;
use crate::types::exercise::{
    BodyPartQuery, CategoryFilter, Exercise, ExerciseCategory, ExercisePlan, ExercisePlanItem,
    ExercisePlanQuery, ExercisePlanUpdate, ExerciseProgress, ExerciseQuery, ExerciseUpdate,
    NewExercise, NewExerciseCategory, NewExercisePlan, NewPlanItem, NewProgress, PlanItemQuery,
    PlanItemUpdate, ProgressQuery, ProgressUpdate,
};
use crate::types::{Acknowledgement, Id, ListResponse};
use crate::Result;

const EXERCISES: &str = "/exercises/";
const CATEGORIES: &str = "/exercise-categories/";
const PLANS: &str = "/exercise-plans/";
const PLAN_ITEMS: &str = "/exercise-plan-items/";
const PROGRESS: &str = "/exercise-progress/";
pub(crate) const PROGRESS_STATS: &str = "/exercise-progress/stats/";

pub struct Exercises<'a> {
    client: &'a ApiClient,
}

impl<'a> Exercises<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ExerciseQuery) -> Result<ListResponse<Exercise>> {
        self.client.get_with(EXERCISES, query).await
    }

    pub async fn get(&self, id: Id) -> Result<Exercise> {
        self.client.get(&item(EXERCISES, id)).await
    }

    pub async fn create(&self, exercise: &NewExercise) -> Result<Exercise> {
        self.client.post(EXERCISES, exercise).await
    }

    pub async fn update(&self, id: Id, update: &ExerciseUpdate) -> Result<Exercise> {
        self.client.patch(&item(EXERCISES, id), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item(EXERCISES, id)).await
    }

    /// All exercises when `category_id` is `None`.
    pub async fn by_category(&self, category_id: Option<Id>) -> Result<ListResponse<Exercise>> {
        self.client
            .get_with("/exercises/by_category/", &CategoryFilter { category_id })
            .await
    }

    /// Case-insensitive match on target body parts; empty input yields an empty list.
    pub async fn search_by_body_part(&self, body_part: &str) -> Result<ListResponse<Exercise>> {
        self.client
            .get_with("/exercises/search_by_body_part/", &BodyPartQuery { body_part })
            .await
    }

    pub async fn categories(&self) -> Result<ListResponse<ExerciseCategory>> {
        self.client.get(CATEGORIES).await
    }

    pub async fn create_category(&self, category: &NewExerciseCategory) -> Result<ExerciseCategory> {
        self.client.post(CATEGORIES, category).await
    }
}

pub struct ExercisePlans<'a> {
    client: &'a ApiClient,
}

impl<'a> ExercisePlans<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ExercisePlanQuery) -> Result<ListResponse<ExercisePlan>> {
        self.client.get_with(PLANS, query).await
    }

    pub async fn get(&self, id: Id) -> Result<ExercisePlan> {
        self.client.get(&item(PLANS, id)).await
    }

    pub async fn create(&self, plan: &NewExercisePlan) -> Result<ExercisePlan> {
        self.client.post(PLANS, plan).await
    }

    pub async fn update(&self, id: Id, update: &ExercisePlanUpdate) -> Result<ExercisePlan> {
        self.client.patch(&item(PLANS, id), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item(PLANS, id)).await
    }

    /// Only the physiotherapist who owns the plan may add to it.
    pub async fn add_exercise(&self, plan_id: Id, entry: &NewPlanItem) -> Result<ExercisePlanItem> {
        self.client
            .post(&item_action(PLANS, plan_id, "add_exercise"), entry)
            .await
    }

    pub async fn exercises(&self, plan_id: Id) -> Result<ListResponse<ExercisePlanItem>> {
        self.client.get(&item_action(PLANS, plan_id, "exercises")).await
    }

    pub async fn active(&self) -> Result<ListResponse<ExercisePlan>> {
        self.client.get("/exercise-plans/active/").await
    }

    /// Set the plan's status to `active`.
    pub async fn activate(&self, plan_id: Id) -> Result<Acknowledgement> {
        self.client
            .post_ack(&item_action(PLANS, plan_id, "activate"))
            .await
    }

    /// Set the plan's status to `completed`.
    pub async fn complete(&self, plan_id: Id) -> Result<Acknowledgement> {
        self.client
            .post_ack(&item_action(PLANS, plan_id, "complete"))
            .await
    }
}

pub struct ExercisePlanItems<'a> {
    client: &'a ApiClient,
}

impl<'a> ExercisePlanItems<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PlanItemQuery) -> Result<ListResponse<ExercisePlanItem>> {
        self.client.get_with(PLAN_ITEMS, query).await
    }

    pub async fn get(&self, id: Id) -> Result<ExercisePlanItem> {
        self.client.get(&item(PLAN_ITEMS, id)).await
    }

    /// `entry.exercise_plan` must be set for this collection.
    pub async fn create(&self, entry: &NewPlanItem) -> Result<ExercisePlanItem> {
        self.client.post(PLAN_ITEMS, entry).await
    }

    pub async fn update(&self, id: Id, update: &PlanItemUpdate) -> Result<ExercisePlanItem> {
        self.client.patch(&item(PLAN_ITEMS, id), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item(PLAN_ITEMS, id)).await
    }
}

pub struct ExerciseProgressApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ExerciseProgressApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ProgressQuery) -> Result<ListResponse<ExerciseProgress>> {
        self.client.get_with(PROGRESS, query).await
    }

    pub async fn create(&self, record: &NewProgress) -> Result<ExerciseProgress> {
        self.client.post(PROGRESS, record).await
    }

    pub async fn update(&self, id: Id, update: &ProgressUpdate) -> Result<ExerciseProgress> {
        self.client.patch(&item(PROGRESS, id), update).await
    }

    pub async fn stats(&self) -> Result<ProgressStats> {
        self.client.get(PROGRESS_STATS).await
    }
}
