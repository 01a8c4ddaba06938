use super::*;
use std::sync::atomic::AtomicUsize;
use crate::supabase::types::auth_callback;

fn client() -> ClientId {
    ClientId::new("tab-a")
}

fn counting_callback(counter: &Arc<AtomicUsize>) -> AuthCallback {
    let counter = Arc::clone(counter);
    auth_callback(move |_event, _session| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn notify_reaches_every_subscriber() {
    let listeners = Arc::new(AuthListeners::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let _a = listeners.subscribe(None, counting_callback(&calls));
    let _b = listeners.subscribe(None, counting_callback(&calls));

    listeners.notify(&client(), AuthEvent::SignedIn, None);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(listeners.len(), 2);
}

#[test]
fn unsubscribed_callback_is_not_called() {
    let listeners = Arc::new(AuthListeners::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let sub = listeners.subscribe(None, counting_callback(&calls));

    sub.unsubscribe();
    listeners.notify(&client(), AuthEvent::SignedOut, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(listeners.is_empty());
}

#[test]
fn unsubscribe_twice_is_harmless() {
    let listeners = Arc::new(AuthListeners::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let first = listeners.subscribe(None, counting_callback(&calls));
    let _second = listeners.subscribe(None, counting_callback(&calls));

    first.unsubscribe();
    first.unsubscribe();
    assert_eq!(listeners.len(), 1);
}

#[test]
fn noop_subscription_unsubscribes_repeatedly() {
    let sub = AuthSubscription::noop();
    assert!(!sub.is_active());
    sub.unsubscribe();
    sub.unsubscribe();
}

#[test]
fn unsubscribe_after_registry_dropped() {
    let listeners = Arc::new(AuthListeners::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let sub = listeners.subscribe(None, counting_callback(&calls));
    drop(listeners);
    assert!(sub.is_active());
    sub.unsubscribe();
}

#[test]
fn callback_may_unsubscribe_itself_during_notify() {
    let listeners = Arc::new(AuthListeners::new());
    let slot: Arc<Mutex<Option<AuthSubscription>>> = Arc::new(Mutex::new(None));
    let inner_slot = Arc::clone(&slot);
    let sub = listeners.subscribe(None, auth_callback(move |_event, _session| {
        if let Some(sub) = inner_slot.lock().unwrap().as_ref() {
            sub.unsubscribe();
        }
    }));
    *slot.lock().unwrap() = Some(sub);

    listeners.notify(&client(), AuthEvent::SignedIn, None);
    assert!(listeners.is_empty());
}

#[test]
fn scoped_callback_only_sees_its_client() {
    let listeners = Arc::new(AuthListeners::new());
    let scoped = Arc::new(AtomicUsize::new(0));
    let global = Arc::new(AtomicUsize::new(0));
    let _a = listeners.subscribe(Some(client()), counting_callback(&scoped));
    let _b = listeners.subscribe(None, counting_callback(&global));

    listeners.notify(&ClientId::new("tab-b"), AuthEvent::SignedIn, None);
    assert_eq!(scoped.load(Ordering::SeqCst), 0);
    assert_eq!(global.load(Ordering::SeqCst), 1);

    listeners.notify(&client(), AuthEvent::SignedOut, None);
    assert_eq!(scoped.load(Ordering::SeqCst), 1);
    assert_eq!(global.load(Ordering::SeqCst), 2);
}
