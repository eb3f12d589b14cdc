use super::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Patient,
    Physiotherapist,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Patient => "patient",
            UserType::Physiotherapist => "physiotherapist",
            UserType::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub user_type: UserType,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl User {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

/// Filters for `GET /users/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial update for `PATCH /users/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub insurance_provider: Option<String>,
    #[serde(default)]
    pub insurance_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysiotherapistProfile {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub license_number: String,
    /// Comma-separated.
    #[serde(default)]
    pub specializations: String,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    /// Decimal rendered as a string, e.g. `"45.00"`.
    #[serde(default)]
    pub consultation_fee: Option<String>,
    #[serde(default)]
    pub is_available: bool,
}

impl PhysiotherapistProfile {
    pub fn specialization_list(&self) -> Vec<&str> {
        self.specializations
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhysiotherapistProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// Profile update responses wrap the user: `{"user": {...}, "message": "..."}`.
/// Some deployments return the profile itself instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProfileUpdateResponse<P> {
    Wrapped {
        user: User,
        #[serde(default)]
        message: Option<String>,
    },
    Profile(P),
}

/// `POST /auth/register/` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistrationResponse {
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/change-password/` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn new(old_password: impl Into<String>, new_password: impl Into<String>) -> Self {
        let new_password = new_password.into();
        Self {
            old_password: old_password.into(),
            confirm_password: new_password.clone(),
            new_password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_decodes_minimal_row() {
        let user: User = serde_json::from_value(json!({
            "id": 4,
            "username": "jdoe",
            "user_type": "physiotherapist"
        }))
        .unwrap();
        assert_eq!(user.user_type, UserType::Physiotherapist);
        assert_eq!(user.full_name(), "jdoe");
    }

    #[test]
    fn test_update_sends_only_changed_fields() {
        let body = serde_json::to_value(UserUpdate {
            phone_number: Some("555-0101".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"phone_number": "555-0101"}));
    }

    #[test]
    fn test_specialization_list() {
        let p: PhysiotherapistProfile = serde_json::from_value(json!({
            "license_number": "PT-1",
            "specializations": "sports, orthopedics,,"
        }))
        .unwrap();
        assert_eq!(p.specialization_list(), vec!["sports", "orthopedics"]);
    }

    #[test]
    fn test_profile_update_response_shapes() {
        let wrapped: ProfileUpdateResponse<PatientProfile> = serde_json::from_value(json!({
            "user": {"id": 1, "username": "p", "user_type": "patient"},
            "message": "Profile updated successfully"
        }))
        .unwrap();
        assert!(matches!(wrapped, ProfileUpdateResponse::Wrapped { .. }));

        let bare: ProfileUpdateResponse<PatientProfile> =
            serde_json::from_value(json!({"id": 3, "medical_history": "ACL"})).unwrap();
        assert!(matches!(bare, ProfileUpdateResponse::Profile(_)));
    }
}
