use super::*;
use crate::config::ExecutionContext;
use crate::state::test_helpers::test_config;
use crate::supabase::test_helpers::FakeBackend;
use crate::supabase::{ClientHandle, Clients};
use std::sync::Arc;

fn build_state(out_dir: PathBuf, admin: Option<Arc<FakeBackend>>) -> AppState {
    let mut config = test_config(ExecutionContext::NonInteractive);
    config.out_dir = out_dir;
    let clients = Clients {
        public: Arc::new(ClientHandle::Mock),
        admin: admin.map(|fake| fake as Arc<dyn crate::supabase::Backend>),
    };
    AppState::new(config, clients, None)
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("saferent-prerender-{name}-{}", std::process::id()))
}

#[tokio::test]
async fn static_pages_render_signed_out_shapes() {
    let state = build_state(scratch_dir("render"), None);
    let pages = render_static_pages(&state).await;
    let names: Vec<&str> = pages.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["index.html", "login.html", "ai.html", "debug.html", "test-supabase.html"]);

    let login = &pages[1].1;
    assert!(login.contains(r#"action="/login""#));
    assert!(!login.contains("Signed in as"));
    assert!(pages[2].1.contains("AI service not configured"));
    assert!(pages[3].1.contains("build"));
    assert!(pages[4].1.contains("Testing..."));
}

#[tokio::test]
async fn prerender_writes_files_and_checks_admin() {
    let dir = scratch_dir("write");
    let fake = FakeBackend::new();
    let state = build_state(dir.clone(), Some(Arc::clone(&fake)));

    let written = prerender(&state).await.unwrap();
    assert_eq!(written.len(), 5);
    for path in &written {
        assert!(path.starts_with(&dir));
        assert!(tokio::fs::metadata(path).await.unwrap().is_file());
    }
    let index = tokio::fs::read_to_string(dir.join("index.html")).await.unwrap();
    assert!(index.contains("SafeRent SF"));
    assert_eq!(fake.calls(), vec!["select profiles count [] limit=Some(1) single=false"]);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn prerender_reports_unwritable_output() {
    let blocker = scratch_dir("blocked");
    tokio::fs::write(&blocker, "not a directory").await.unwrap();
    let state = build_state(blocker.join("dist"), None);

    let err = prerender(&state).await.unwrap_err();
    assert!(matches!(err, PrerenderError::CreateDir { .. }));
    tokio::fs::remove_file(&blocker).await.unwrap();
}
