use super::*;

#[test]
fn not_initialized_serializes_to_degraded_shape() {
    let result: ServiceResult<Value> = ServiceResult::not_initialized("Supabase");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, serde_json::json!({ "data": null, "error": { "message": "Supabase not initialized" } }));
    assert!(!result.is_ok());
    assert_eq!(result.error_message(), Some("Supabase not initialized"));
}

#[test]
fn empty_serializes_both_null() {
    let result: ServiceResult<AuthData> = ServiceResult::empty();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, serde_json::json!({ "data": null, "error": null }));
    assert!(result.is_ok());
}

#[test]
fn user_keeps_unknown_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "u1",
        "email": "a@b.com",
        "role": "authenticated",
        "app_metadata": { "provider": "email" }
    }))
    .unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
    assert_eq!(user.extra.get("role").and_then(Value::as_str), Some("authenticated"));
    assert!(user.extra.contains_key("app_metadata"));
}

#[test]
fn session_defaults_token_type() {
    let session: Session = serde_json::from_value(serde_json::json!({ "access_token": "tok" })).unwrap();
    assert_eq!(session.token_type, "bearer");
    assert!(session.user.is_none());
}

#[test]
fn credentials_debug_redacts_password() {
    let creds = Credentials::new("a@b.com", "hunter2");
    let debug = format!("{creds:?}");
    assert!(debug.contains("a@b.com"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn auth_event_wire_names() {
    assert_eq!(serde_json::to_value(AuthEvent::SignedIn).unwrap(), "SIGNED_IN");
    assert_eq!(AuthEvent::InitialSession.as_str(), "INITIAL_SESSION");
    assert_eq!(AuthEvent::SignedOut.as_str(), "SIGNED_OUT");
}

#[test]
fn select_query_builder_chains() {
    let q = SelectQuery::table("profiles").select("id,name").eq("id", "u1").limit(1).single();
    assert_eq!(q.table, "profiles");
    assert_eq!(q.columns, "id,name");
    assert_eq!(q.filters, vec![("id".to_owned(), "u1".to_owned())]);
    assert_eq!(q.limit, Some(1));
    assert!(q.single);
}

#[test]
fn select_query_defaults_to_all_columns() {
    let q = SelectQuery::table("saved_rentals");
    assert_eq!(q.columns, "*");
    assert!(q.filters.is_empty());
    assert!(!q.single);
}
