use super::*;
use crate::supabase::test_helpers::{FakeBackend, real_handle};
use serde_json::json;

fn database(handle: ClientHandle) -> Database {
    Database::new(Arc::new(handle))
}

#[tokio::test]
async fn unavailable_calls_are_not_initialized() {
    let db = database(ClientHandle::Unavailable);
    let expected: ServiceResult<Value> = ServiceResult::not_initialized("Supabase");

    assert_eq!(db.get_saved_rentals(None, "u1").await, expected);
    assert_eq!(db.save_rental(None, &json!({ "address": "1 Market St" })).await, expected);
    assert_eq!(db.get_user_profile(None, "u1").await, expected);
    assert_eq!(db.check_connection().await, expected);
}

#[tokio::test]
async fn mock_saved_rentals_resolve_empty() {
    let db = database(ClientHandle::Mock);
    let result = db.get_saved_rentals(None, "u1").await;
    assert_eq!(serde_json::to_value(&result).unwrap(), json!({ "data": null, "error": null }));
}

#[tokio::test]
async fn mock_resolves_empty_for_any_arguments() {
    let db = database(ClientHandle::Mock);
    assert_eq!(db.get_saved_rentals(None, "").await, ServiceResult::empty());
    assert_eq!(db.save_rental(None, &json!(null)).await, ServiceResult::empty());
    assert_eq!(db.get_user_profile(None, "nobody").await, ServiceResult::empty());
    assert_eq!(db.check_connection().await, ServiceResult::empty());
}

#[tokio::test]
async fn saved_rentals_filter_on_user_id() {
    let fake = FakeBackend::new();
    let db = Database::new(real_handle(&fake));

    let result = db.get_saved_rentals(None, "u1").await;

    assert_eq!(result.data, Some(json!([{ "id": 1, "user_id": "u1" }])));
    assert_eq!(fake.calls(), vec!["select saved_rentals * [user_id=eq.u1] limit=None single=false"]);
}

#[tokio::test]
async fn save_rental_forwards_record_unvalidated() {
    let fake = FakeBackend::new();
    let db = Database::new(real_handle(&fake));

    db.save_rental(None, &json!({ "anything": true })).await;

    assert_eq!(fake.calls(), vec![r#"insert saved_rentals {"anything":true}"#]);
}

#[tokio::test]
async fn profile_is_single_row_by_id() {
    let fake = FakeBackend::new();
    let db = Database::new(real_handle(&fake));

    let result = db.get_user_profile(None, "u1").await;

    assert_eq!(result.data, Some(json!({ "id": "u1", "name": "Ada" })));
    assert_eq!(fake.calls(), vec!["select profiles * [id=eq.u1] limit=None single=true"]);
}

#[tokio::test]
async fn check_connection_counts_profiles() {
    let fake = FakeBackend::new();
    let db = Database::new(real_handle(&fake));

    db.check_connection().await;

    assert_eq!(fake.calls(), vec!["select profiles count [] limit=Some(1) single=false"]);
}
