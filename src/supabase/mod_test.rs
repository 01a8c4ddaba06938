use super::*;
use std::path::PathBuf;

fn config(context: ExecutionContext, anon_key: Option<&str>, service_key: Option<&str>) -> AppConfig {
    AppConfig {
        context,
        supabase_url: "http://127.0.0.1:9".into(),
        anon_key: anon_key.map(str::to_owned),
        service_key: service_key.map(str::to_owned),
        ai_base_url: None,
        host: "127.0.0.1".into(),
        port: 3000,
        out_dir: PathBuf::from("dist"),
        cookie_secure: false,
    }
}

#[test]
fn build_context_is_mock_without_keys() {
    let handle = ClientHandle::init(&config(ExecutionContext::NonInteractive, None, None));
    assert!(matches!(handle, ClientHandle::Mock));
}

#[test]
fn build_context_is_mock_even_with_key() {
    let handle = ClientHandle::init(&config(ExecutionContext::NonInteractive, Some("anon"), None));
    assert!(matches!(handle, ClientHandle::Mock));
}

#[test]
fn interactive_without_key_is_unavailable() {
    let handle = ClientHandle::init(&config(ExecutionContext::Interactive, None, None));
    assert!(matches!(handle, ClientHandle::Unavailable));
    assert_eq!(handle.kind(), "unavailable");
}

#[test]
fn interactive_with_key_is_real() {
    let handle = ClientHandle::init(&config(ExecutionContext::Interactive, Some("anon"), None));
    assert!(matches!(handle, ClientHandle::Real(_)));
    assert_eq!(format!("{handle:?}"), "real");
}

#[test]
fn admin_only_in_build_context_with_service_key() {
    assert!(init_admin(&config(ExecutionContext::NonInteractive, None, Some("service"))).is_some());
    assert!(init_admin(&config(ExecutionContext::NonInteractive, None, None)).is_none());
    assert!(init_admin(&config(ExecutionContext::Interactive, Some("anon"), Some("service"))).is_none());
}

#[test]
fn clients_init_builds_both_handles() {
    let clients = Clients::init(&config(ExecutionContext::NonInteractive, None, Some("service")));
    assert!(matches!(*clients.public, ClientHandle::Mock));
    assert!(clients.admin.is_some());
}
