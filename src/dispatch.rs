use crate::hotkey::KeyCombo;
use crate::registry::{Binding, HotkeyRegistry};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

/// A key event as delivered by an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Vec<String>,
}

impl KeyEvent {
    pub fn new<I, S>(key: impl Into<String>, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            modifiers: modifiers.into_iter().map(Into::into).collect(),
        }
    }

    fn modifier_refs(&self) -> Vec<&str> {
        self.modifiers.iter().map(String::as_str).collect()
    }
}

impl From<&KeyCombo> for KeyEvent {
    fn from(combo: &KeyCombo) -> Self {
        Self::new(combo.key(), combo.modifiers().iter().cloned())
    }
}

/// Registry behind a mutex, cloneable across capture threads.
///
/// A panic inside an action poisons the lock; the registry state is still
/// consistent at that point so the poison is cleared rather than propagated.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<HotkeyRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: HotkeyRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HotkeyRegistry> {
        match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("hotkey registry lock poisoned; recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn register(&self, binding: Binding) -> bool {
        self.lock().register(binding)
    }

    pub fn unregister(&self, key: &str, modifiers: &[&str]) -> bool {
        self.lock().unregister(key, modifiers)
    }

    /// The matched action runs with the lock held, so it must not call back
    /// into this registry.
    pub fn process(&self, key: &str, modifiers: &[&str]) -> bool {
        self.lock().process(key, modifiers)
    }

    pub fn process_event(&self, event: &KeyEvent) -> bool {
        self.process(&event.key, &event.modifier_refs())
    }

    pub fn enable(&self) {
        self.lock().enable()
    }

    pub fn disable(&self) {
        self.lock().disable()
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().is_enabled()
    }

    pub fn list(&self) -> Vec<Binding> {
        self.lock().list()
    }

    /// Run a closure while holding the registry lock.
    pub fn with_registry<R>(&self, f: impl FnOnce(&mut HotkeyRegistry) -> R) -> R {
        f(&mut self.lock())
    }
}

pub enum DispatchCommand {
    Key(KeyEvent, Option<Sender<bool>>),
    Register(Binding, Sender<bool>),
    Unregister(KeyEvent, Sender<bool>),
    SetEnabled(bool),
    Shutdown,
}

/// Owns a registry on a dedicated thread and applies commands in arrival
/// order, so every registry operation runs on one logical thread.
///
/// A panicking action is reported as not triggered and the worker keeps
/// serving commands.
pub struct Dispatcher;

impl Dispatcher {
    pub fn spawn(registry: HotkeyRegistry) -> DispatcherHandle {
        let (tx, rx) = mpsc::channel();
        tracing::debug!("starting hotkey dispatcher");
        let thread = thread::spawn(move || run(registry, rx));
        DispatcherHandle {
            tx,
            thread: Some(thread),
        }
    }
}

fn run(mut registry: HotkeyRegistry, rx: Receiver<DispatchCommand>) -> HotkeyRegistry {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            DispatchCommand::Key(event, reply) => {
                let triggered = match panic::catch_unwind(AssertUnwindSafe(|| {
                    registry.process(&event.key, &event.modifier_refs())
                })) {
                    Ok(triggered) => triggered,
                    Err(_) => {
                        tracing::error!(key = %event.key, "hotkey action panicked");
                        false
                    }
                };
                tracing::debug!(key = %event.key, triggered, "key event dispatched");
                if let Some(reply) = reply {
                    let _ = reply.send(triggered);
                }
            }
            DispatchCommand::Register(binding, reply) => {
                let _ = reply.send(registry.register(binding));
            }
            DispatchCommand::Unregister(event, reply) => {
                let _ = reply.send(registry.unregister(&event.key, &event.modifier_refs()));
            }
            DispatchCommand::SetEnabled(true) => registry.enable(),
            DispatchCommand::SetEnabled(false) => registry.disable(),
            DispatchCommand::Shutdown => break,
        }
    }
    tracing::debug!("hotkey dispatcher stopped");
    registry
}

pub struct DispatcherHandle {
    tx: Sender<DispatchCommand>,
    thread: Option<JoinHandle<HotkeyRegistry>>,
}

impl DispatcherHandle {
    pub fn sender(&self) -> Sender<DispatchCommand> {
        self.tx.clone()
    }

    /// Dispatch `event` and wait for the result. Returns `false` if the
    /// dispatcher has already shut down.
    pub fn process(&self, event: KeyEvent) -> bool {
        self.request(|reply| DispatchCommand::Key(event, Some(reply)))
    }

    /// Queue `event` without waiting for the action to run.
    pub fn process_detached(&self, event: KeyEvent) {
        let _ = self.tx.send(DispatchCommand::Key(event, None));
    }

    pub fn register(&self, binding: Binding) -> bool {
        self.request(|reply| DispatchCommand::Register(binding, reply))
    }

    pub fn unregister(&self, event: KeyEvent) -> bool {
        self.request(|reply| DispatchCommand::Unregister(event, reply))
    }

    pub fn set_enabled(&self, enabled: bool) {
        let _ = self.tx.send(DispatchCommand::SetEnabled(enabled));
    }

    /// Stop the worker thread and hand back its registry.
    pub fn shutdown(mut self) -> Option<HotkeyRegistry> {
        let _ = self.tx.send(DispatchCommand::Shutdown);
        self.thread.take().and_then(|t| t.join().ok())
    }

    fn request(&self, cmd: impl FnOnce(Sender<bool>) -> DispatchCommand) -> bool {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self.tx.send(cmd(reply_tx)).is_err() {
            return false;
        }
        reply_rx.recv().unwrap_or(false)
    }
}

impl Drop for DispatcherHandle {
    fn drop(&mut self) {
        if let Some(t) = self.thread.take() {
            let _ = self.tx.send(DispatchCommand::Shutdown);
            let _ = t.join();
        }
    }
}
