//! Resource handles: paths, verbs, query shaping and response decoding.

mod common;

use common::MockBackend;
use mockito::Matcher;
use physio_client::types::appointment::{AppointmentQuery, AppointmentStatus};
use physio_client::types::exercise::{Difficulty, ExerciseQuery};
use physio_client::types::notification::{NotificationQuery, NotificationType, PreferencesUpdate};
use physio_client::types::user::PatientProfileUpdate;
use physio_client::types::user::ProfileUpdateResponse;
use physio_client::ApiErrorKind;
use serde_json::json;

const APPOINTMENT: &str = r#"{
    "id": 5,
    "patient": 7,
    "physiotherapist": {"id": 3, "username": "physio", "user_type": "physiotherapist"},
    "date": "2026-11-02",
    "start_time": "09:00:00",
    "end_time": "09:45:00",
    "status": "confirmed",
    "reason": "knee"
}"#;

#[tokio::test]
async fn test_appointment_filters_use_exact_match_fields() {
    let mut backend = MockBackend::logged_in().await;
    let mock = backend
        .server
        .mock("GET", "/api/appointments/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("status".into(), "confirmed".into()),
            Matcher::UrlEncoded("physiotherapist".into(), "3".into()),
            Matcher::UrlEncoded("search".into(), "knee".into()),
        ]))
        .match_header("authorization", "Token abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"count": 1, "next": null, "previous": null, "results": [{}]}}"#,
            APPOINTMENT
        ))
        .create_async()
        .await;

    let list = backend
        .client
        .appointments()
        .list(&AppointmentQuery {
            search: Some("knee".to_string()),
            status: Some(AppointmentStatus::Confirmed),
            physiotherapist: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(list.total(), 1);
    let appt = &list.items()[0];
    assert_eq!(appt.status, AppointmentStatus::Confirmed);
    assert_eq!(appt.patient.as_ref().map(|p| p.id()), Some(7));
    assert_eq!(
        appt.physiotherapist.user().map(|u| u.username.as_str()),
        Some("physio")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upcoming_accepts_plain_array() {
    let mut backend = MockBackend::logged_in().await;
    let mock = backend
        .json("GET", "/appointments/upcoming/", 200, &format!("[{}]", APPOINTMENT))
        .create_async()
        .await;

    let list = backend.client.appointments().upcoming().await.unwrap();

    assert_eq!(list.total(), 1);
    assert!(list.next_page().is_none());
    assert!(list.items()[0].status.is_open());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_appointment_actions_acknowledge() {
    let mut backend = MockBackend::logged_in().await;
    let cancel = backend
        .json("POST", "/appointments/5/cancel/", 200, r#"{"status": "appointment cancelled"}"#)
        .create_async()
        .await;
    let confirm = backend
        .server
        .mock("POST", "/api/appointments/5/confirm/")
        .with_status(204)
        .create_async()
        .await;

    let ack = backend.client.appointments().cancel(5).await.unwrap();
    assert_eq!(ack.status.as_deref(), Some("appointment cancelled"));
    let ack = backend.client.appointments().confirm(5).await.unwrap();
    assert_eq!(ack, Default::default());

    cancel.assert_async().await;
    confirm.assert_async().await;
}

#[tokio::test]
async fn test_exercise_queries() {
    let mut backend = MockBackend::logged_in().await;
    let exercise = r#"[{"id": 1, "name": "Squat", "category": 2, "difficulty": "beginner"}]"#;
    let list = backend
        .server
        .mock("GET", "/api/exercises/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("difficulty".into(), "beginner".into()),
            Matcher::UrlEncoded("category".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(exercise)
        .create_async()
        .await;
    let by_category = backend
        .server
        .mock("GET", "/api/exercises/by_category/")
        .match_query(Matcher::UrlEncoded("category_id".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(exercise)
        .create_async()
        .await;
    let by_body_part = backend
        .server
        .mock("GET", "/api/exercises/search_by_body_part/")
        .match_query(Matcher::UrlEncoded("body_part".into(), "knee".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let exercises = backend.client.exercises();
    let found = exercises
        .list(&ExerciseQuery {
            category: Some(2),
            difficulty: Some(Difficulty::Beginner),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.items()[0].name, "Squat");
    assert_eq!(exercises.by_category(Some(2)).await.unwrap().total(), 1);
    assert!(exercises.search_by_body_part("knee").await.unwrap().is_empty());

    list.assert_async().await;
    by_category.assert_async().await;
    by_body_part.assert_async().await;
}

#[tokio::test]
async fn test_notification_filter_uses_backend_field_name() {
    let mut backend = MockBackend::logged_in().await;
    let mock = backend
        .server
        .mock("GET", "/api/notifications/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("notification_type".into(), "appointment".into()),
            Matcher::UrlEncoded("is_read".into(), "false".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": 9, "notification_type": "appointment", "title": "Reminder", "is_read": false}]"#,
        )
        .create_async()
        .await;

    let list = backend
        .client
        .notifications()
        .list(&NotificationQuery {
            is_read: Some(false),
            notification_type: Some(NotificationType::Appointment),
        })
        .await
        .unwrap();

    assert_eq!(list.items()[0].title, "Reminder");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_preferences_is_not_found() {
    let mut backend = MockBackend::logged_in().await;
    let _list = backend
        .json("GET", "/notification-preferences/", 200, "[]")
        .create_async()
        .await;

    let err = backend.client.notifications().preferences().await.unwrap_err();

    assert_eq!(err.api_kind(), Some(ApiErrorKind::NotFound));
}

#[tokio::test]
async fn test_update_preferences_patches_existing_row() {
    let mut backend = MockBackend::logged_in().await;
    let _list = backend
        .json(
            "GET",
            "/notification-preferences/",
            200,
            r#"{"count": 1, "next": null, "previous": null, "results": [{"id": 4}]}"#,
        )
        .create_async()
        .await;
    let patch = backend
        .server
        .mock("PATCH", "/api/notification-preferences/4/")
        .match_body(Matcher::Json(json!({"push_notifications": false})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 4, "push_notifications": false}"#)
        .create_async()
        .await;

    let prefs = backend
        .client
        .notifications()
        .update_preferences(&PreferencesUpdate {
            push_notifications: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!prefs.push_notifications);
    assert!(prefs.email_notifications);
    patch.assert_async().await;
}

#[tokio::test]
async fn test_update_preferences_creates_first_row() {
    let mut backend = MockBackend::logged_in().await;
    let _list = backend
        .json("GET", "/notification-preferences/", 200, "[]")
        .create_async()
        .await;
    let post = backend
        .json(
            "POST",
            "/notification-preferences/",
            201,
            r#"{"id": 11, "exercise_reminders": false}"#,
        )
        .match_body(Matcher::Json(json!({"exercise_reminders": false})))
        .create_async()
        .await;

    let prefs = backend
        .client
        .notifications()
        .update_preferences(&PreferencesUpdate {
            exercise_reminders: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(prefs.id, Some(11));
    post.assert_async().await;
}

#[tokio::test]
async fn test_book_bookmark_round() {
    let mut backend = MockBackend::logged_in().await;
    let add = backend
        .json("POST", "/books/3/bookmark/", 201, r#"{"status": "book bookmarked"}"#)
        .create_async()
        .await;
    let remove = backend
        .server
        .mock("DELETE", "/api/books/3/bookmark/")
        .with_status(204)
        .create_async()
        .await;

    let books = backend.client.books();
    let ack = books.bookmark(3).await.unwrap();
    assert_eq!(ack.status.as_deref(), Some("book bookmarked"));
    books.remove_bookmark(3).await.unwrap();

    add.assert_async().await;
    remove.assert_async().await;
}

#[tokio::test]
async fn test_chat_attachment_is_multipart() {
    let mut backend = MockBackend::logged_in().await;
    let upload = backend
        .server
        .mock("POST", "/api/messages/12/attachments/")
        .match_header("authorization", "Token abc")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::Regex(r#"name="file"; filename="scan.pdf""#.to_string()))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "file_name": "scan.pdf", "file_type": "application/pdf"}"#)
        .create_async()
        .await;

    let attachment = backend
        .client
        .chat()
        .upload_attachment(12, "scan.pdf", b"%PDF-1.4".to_vec(), Some("application/pdf"))
        .await
        .unwrap();

    assert_eq!(attachment.file_name, "scan.pdf");
    upload.assert_async().await;
}

#[tokio::test]
async fn test_patient_adherence_scopes_stats() {
    let mut backend = MockBackend::logged_in().await;
    let mock = backend
        .server
        .mock("GET", "/api/exercise-progress/stats/")
        .match_query(Matcher::UrlEncoded("patient".into(), "7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total_sessions": 8, "completed_sessions": 6}"#)
        .create_async()
        .await;

    let adherence = backend.client.analytics().patient_adherence(7).await.unwrap();

    assert_eq!(adherence.patient, 7);
    assert_eq!(adherence.rate_percent(), 75);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_profile_update_uses_put_and_accepts_wrapped_reply() {
    let mut backend = MockBackend::logged_in().await;
    let mock = backend
        .json(
            "PUT",
            "/auth/patient-profile/",
            200,
            r#"{"user": {"id": 7, "username": "pat", "user_type": "patient"}, "message": "Profile updated successfully"}"#,
        )
        .match_body(Matcher::Json(json!({"insurance_provider": "AOK"})))
        .create_async()
        .await;

    let reply = backend
        .client
        .profiles()
        .update_patient(&PatientProfileUpdate {
            insurance_provider: Some("AOK".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    match reply {
        ProfileUpdateResponse::Wrapped { user, message } => {
            assert_eq!(user.id, 7);
            assert_eq!(message.as_deref(), Some("Profile updated successfully"));
        }
        other => panic!("unexpected reply: {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_shape_mismatch_is_unknown_error_with_raw_body() {
    let mut backend = MockBackend::logged_in().await;
    let _mock = backend
        .json("GET", "/books/1/", 200, r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let err = backend.client.books().get(1).await.unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.kind, ApiErrorKind::UnknownError);
    assert_eq!(api.details, Some(json!({"unexpected": true})));
    assert_eq!(api.context.source.as_deref(), Some("decode"));
}

#[tokio::test]
async fn test_today_and_available_physiotherapists() {
    let mut backend = MockBackend::logged_in().await;
    let today = backend
        .json("GET", "/appointments/today/", 200, &format!("[{}]", APPOINTMENT))
        .create_async()
        .await;
    let available = backend
        .json(
            "GET",
            "/physiotherapists/available/",
            200,
            r#"[{"id": 2, "license_number": "PT-1", "specializations": "knee, spine", "is_available": true}]"#,
        )
        .create_async()
        .await;

    let list = backend.client.appointments().today().await.unwrap();
    assert_eq!(list.items()[0].date, "2026-11-02");

    let profiles = backend.client.users().available_physiotherapists().await.unwrap();
    let profile = &profiles.items()[0];
    assert!(profile.is_available);
    assert_eq!(profile.specialization_list(), vec!["knee", "spine"]);

    today.assert_async().await;
    available.assert_async().await;
}

#[tokio::test]
async fn test_exercise_plan_status_actions() {
    let mut backend = MockBackend::logged_in().await;
    let activate = backend
        .json("POST", "/exercise-plans/4/activate/", 200, r#"{"message": "Plan activated"}"#)
        .create_async()
        .await;
    let complete = backend
        .json("POST", "/exercise-plans/4/complete/", 200, r#"{"message": "Plan completed"}"#)
        .create_async()
        .await;

    let plans = backend.client.exercise_plans();
    let ack = plans.activate(4).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Plan activated"));
    let ack = plans.complete(4).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Plan completed"));

    activate.assert_async().await;
    complete.assert_async().await;
}
