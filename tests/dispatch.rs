use aicodex::dispatch::{Dispatcher, KeyEvent, SharedRegistry};
use aicodex::registry::{Binding, HotkeyRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

fn counting_binding(key: &str, count: &Arc<AtomicUsize>) -> Binding {
    let c = count.clone();
    Binding::new(key, ["ctrl"]).unwrap().with_action(move || {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn shared_registry_serializes_capture_threads() {
    let count = Arc::new(AtomicUsize::new(0));
    let shared = SharedRegistry::new(HotkeyRegistry::new());
    assert!(shared.register(counting_binding("a", &count)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    assert!(shared.process("a", &["ctrl"]));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(count.load(Ordering::SeqCst), 100);
}

#[test]
fn shared_registry_survives_panicking_action() {
    let shared = SharedRegistry::new(HotkeyRegistry::new());
    shared.register(Binding::new("p", Vec::<String>::new()).unwrap().with_action(|| panic!("boom")));

    let s = shared.clone();
    let result = thread::spawn(move || s.process("p", &[])).join();
    assert!(result.is_err());

    shared.disable();
    assert!(!shared.is_enabled());
    assert_eq!(shared.list().len(), 1);
    assert!(shared.unregister("p", &[]));
}

#[test]
fn dispatcher_runs_commands_in_order() {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Dispatcher::spawn(HotkeyRegistry::new());

    assert!(handle.register(counting_binding("a", &count)));
    assert!(!handle.register(counting_binding("a", &count)));
    assert!(handle.process(KeyEvent::new("a", ["ctrl"])));
    assert!(!handle.process(KeyEvent::new("a", Vec::<String>::new())));

    handle.set_enabled(false);
    assert!(!handle.process(KeyEvent::new("a", ["ctrl"])));
    handle.set_enabled(true);

    handle.process_detached(KeyEvent::new("a", ["ctrl"]));
    assert!(handle.unregister(KeyEvent::new("a", ["ctrl"])));

    let registry = handle.shutdown().expect("dispatcher thread joined");
    assert!(registry.is_empty());
    assert!(registry.is_enabled());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn dispatcher_survives_panicking_action() {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Dispatcher::spawn(HotkeyRegistry::new());
    assert!(handle.register(
        Binding::new("p", ["ctrl"]).unwrap().with_action(|| panic!("boom"))
    ));

    assert!(!handle.process(KeyEvent::new("p", ["ctrl"])));
    handle.process_detached(KeyEvent::new("p", ["ctrl"]));

    assert!(handle.register(counting_binding("a", &count)));
    assert!(handle.process(KeyEvent::new("a", ["ctrl"])));
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let registry = handle.shutdown().expect("dispatcher thread joined");
    assert_eq!(registry.len(), 2);
}

#[test]
fn dispatcher_accepts_events_from_other_threads() {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Dispatcher::spawn(HotkeyRegistry::new());
    handle.register(counting_binding("k", &count));

    let sender = handle.sender();
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let (reply_tx, reply_rx) = mpsc::channel();
        sender
            .send(aicodex::dispatch::DispatchCommand::Key(
                KeyEvent::new("k", ["ctrl"]),
                Some(reply_tx),
            ))
            .unwrap();
        done_tx.send(reply_rx.recv().unwrap()).unwrap();
    });

    assert!(done_rx.recv_timeout(Duration::from_secs(5)).unwrap());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn key_event_from_combo() {
    let combo = aicodex::parse_hotkey("ctrl+shift+o").unwrap();
    let event = KeyEvent::from(&combo);
    assert_eq!(event.key, "o");
    assert_eq!(event.modifiers, vec!["ctrl".to_string(), "shift".to_string()]);
}
