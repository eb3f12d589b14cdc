use super::appointment::UserRef;
use super::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCategory {
    #[serde(default)]
    pub id: Option<Id>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub id: Option<Id>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Id,
    #[serde(default)]
    pub category_name: Option<String>,
    pub difficulty: Difficulty,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExerciseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

/// `GET /exercises/by_category/`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
}

/// `GET /exercises/search_by_body_part/`
#[derive(Debug, Clone, Serialize)]
pub struct BodyPartQuery<'a> {
    pub body_part: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExercise {
    pub name: String,
    pub description: String,
    pub category: Id,
    pub difficulty: Difficulty,
    pub duration: u32,
    pub repetitions: u32,
    pub sets: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExerciseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExerciseCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 0 = Monday .. 6 = Sunday.
pub type DayOfWeek = u8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePlanItem {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub exercise_plan: Option<Id>,
    pub exercise: ExerciseRef,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub custom_repetitions: Option<u32>,
    #[serde(default)]
    pub custom_sets: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Nested exercise on plan reads, bare id elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExerciseRef {
    Id(Id),
    Exercise(Box<Exercise>),
}

impl ExerciseRef {
    pub fn id(&self) -> Option<Id> {
        match self {
            ExerciseRef::Id(id) => Some(*id),
            ExerciseRef::Exercise(e) => e.id,
        }
    }
}

/// Body for `add_exercise` and `POST /exercise-plan-items/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPlanItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_plan: Option<Id>,
    pub exercise_id: Id,
    pub day_of_week: DayOfWeek,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_repetitions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewPlanItem {
    pub fn new(exercise_id: Id, day_of_week: DayOfWeek) -> Self {
        Self {
            exercise_plan: None,
            exercise_id,
            day_of_week,
            custom_repetitions: None,
            custom_sets: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_repetitions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanItemQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_plan: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePlan {
    #[serde(default)]
    pub id: Option<Id>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub patient: Option<UserRef>,
    #[serde(default)]
    pub physiotherapist: Option<UserRef>,
    #[serde(default)]
    pub plan_items: Vec<ExercisePlanItem>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExercisePlanQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// `POST /exercise-plans/`; the physiotherapist is the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExercisePlan {
    pub name: String,
    pub description: String,
    pub patient: Id,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_items: Vec<NewPlanItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExercisePlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub patient: Option<Id>,
    pub exercise_plan_item: Id,
    #[serde(default)]
    pub exercise_name: Option<String>,
    pub date_completed: String,
    pub completed_repetitions: u32,
    pub completed_sets: u32,
    /// 1 (very easy) to 5 (very hard).
    pub difficulty_rating: u8,
    /// 0 (none) to 4 (very severe).
    pub pain_level: u8,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Exact-match filters; results come newest `date_completed` first unless
/// `ordering` says otherwise.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgressQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_plan_item: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProgress {
    pub exercise_plan_item: Id,
    pub date_completed: String,
    pub completed_repetitions: u32,
    pub completed_sets: u32,
    pub difficulty_rating: u8,
    pub pain_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_repetitions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
