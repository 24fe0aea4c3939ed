//! Repository tests against a live PostgreSQL.
//!
//! Run with `cargo test -p vociform_database --features pg-tests`
//! and a `DATABASE_URL` pointing at a disposable database.

#![cfg(feature = "pg-tests")]

use chrono::{Duration, Utc};
use uuid::Uuid;
use vociform_core::{FieldKind, FormField, NewForm, NewResponse, NewUsageEvent, PlanTier};
use vociform_database::{
    append_event, create_form, delete_form, establish_connection, get_active_form,
    get_or_create_account, increment_usage, insert_response, list_forms, list_responses,
    recent_event_count, reset_period, run_migrations, update_form,
};
use vociform_interface::{AccountDefaults, FormUpdate};

fn defaults() -> AccountDefaults {
    AccountDefaults {
        plan_tier: PlanTier::Free,
        calls_limit: 50,
        period_end: Utc::now() + Duration::days(30),
    }
}

#[test]
fn account_lifecycle_round_trip() {
    let mut conn = establish_connection().unwrap();
    run_migrations(&mut conn).unwrap();
    let user = Uuid::new_v4();

    let created = get_or_create_account(&mut conn, user, defaults()).unwrap();
    assert_eq!(created.calls_used, 0);
    assert_eq!(created.calls_limit, 50);
    assert_eq!(created.plan_tier, PlanTier::Free);

    // Second call is a no-op re-select, not a duplicate insert.
    let again = get_or_create_account(&mut conn, user, defaults()).unwrap();
    assert_eq!(again.created_at, created.created_at);

    increment_usage(&mut conn, user).unwrap();
    increment_usage(&mut conn, user).unwrap();
    let bumped = get_or_create_account(&mut conn, user, defaults()).unwrap();
    assert_eq!(bumped.calls_used, 2);

    let next_end = Utc::now() + Duration::days(60);
    reset_period(&mut conn, user, next_end).unwrap();
    let reset = get_or_create_account(&mut conn, user, defaults()).unwrap();
    assert_eq!(reset.calls_used, 0);
}

#[test]
fn event_log_counts_within_window() {
    let mut conn = establish_connection().unwrap();
    run_migrations(&mut conn).unwrap();
    let user = Uuid::new_v4();

    for _ in 0..3 {
        append_event(
            &mut conn,
            NewUsageEvent::new(user, "transcribe", 2)
                .with_metadata(serde_json::json!({"file_size": 1024})),
        )
        .unwrap();
    }

    let window = Utc::now() - Duration::seconds(60);
    assert_eq!(recent_event_count(&mut conn, user, window).unwrap(), 3);
    // A window starting in the future sees nothing.
    let future = Utc::now() + Duration::seconds(5);
    assert_eq!(recent_event_count(&mut conn, user, future).unwrap(), 0);
}

#[test]
fn form_crud_and_responses() {
    let mut conn = establish_connection().unwrap();
    run_migrations(&mut conn).unwrap();
    let owner = Uuid::new_v4();

    let form = create_form(
        &mut conn,
        owner,
        NewForm {
            title: "Intake".to_string(),
            description: String::new(),
            fields: vec![FormField {
                id: "q1".to_string(),
                label: "Name".to_string(),
                kind: FieldKind::Text,
                required: true,
                options: vec![],
            }],
        },
    )
    .unwrap();
    assert!(form.is_active);

    insert_response(
        &mut conn,
        NewResponse {
            form_id: form.id,
            response_data: serde_json::json!({"q1": "Ada"}),
            ip_address: "unknown".to_string(),
            user_agent: "unknown".to_string(),
        },
    )
    .unwrap();

    let listed = list_forms(&mut conn, owner).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].response_count, 1);

    let updated = update_form(
        &mut conn,
        owner,
        form.id,
        FormUpdate {
            is_active: Some(false),
            ..FormUpdate::default()
        },
    )
    .unwrap();
    assert!(!updated.is_active);
    assert!(get_active_form(&mut conn, form.id).unwrap().is_none());

    let responses = list_responses(&mut conn, form.id).unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].response_data["q1"], "Ada");

    delete_form(&mut conn, owner, form.id).unwrap();
    // Cascade removed the response rows.
    assert!(list_responses(&mut conn, form.id).unwrap().is_empty());
}

#[test]
fn ownership_is_enforced() {
    let mut conn = establish_connection().unwrap();
    run_migrations(&mut conn).unwrap();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let form = create_form(
        &mut conn,
        owner,
        NewForm {
            title: "Private".to_string(),
            description: String::new(),
            fields: vec![FormField {
                id: "q1".to_string(),
                label: "Secret".to_string(),
                kind: FieldKind::Text,
                required: false,
                options: vec![],
            }],
        },
    )
    .unwrap();

    let err = delete_form(&mut conn, stranger, form.id).unwrap_err();
    assert!(err.is_not_found());
    let err = update_form(&mut conn, stranger, form.id, FormUpdate::default()).unwrap_err();
    assert!(err.is_not_found());

    delete_form(&mut conn, owner, form.id).unwrap();
}
