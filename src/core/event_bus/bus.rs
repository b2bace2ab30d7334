//=========================================================================
// Event Bus
//=========================================================================
//
// Synchronous publish/subscribe registry for game → UI notifications.
//
// Architecture:
//   Producers → emit(&GameEvent) → HashMap<EventKind, Vec<Listener>>
//                                        ↓ snapshot
//   Listeners ← callback(&GameEvent) (registration order)
//
// The bus is an owned object handed to producers and consumers; cloning
// an `EventBus` yields another handle to the same registry. All handles
// live on the logic thread.
//
// Emission iterates a snapshot taken when `emit` starts, so listeners may
// subscribe, unsubscribe or emit from inside a callback. A listener that
// panics is logged and skipped; the remaining listeners still run.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use log::{error, trace};

//=== Internal Dependencies ===============================================

use super::event::{EventKind, GameEvent};

//=== Public API ==========================================================

/// Shared listener callback.
///
/// Keep a clone of the `Rc` to remove the listener later with
/// [`EventBus::off`].
pub type Callback = Rc<dyn Fn(&GameEvent)>;

//=== Registry ============================================================

struct Listener {
    id: u64,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    listeners: HashMap<EventKind, Vec<Listener>>,
    next_id: u64,
}

impl Registry {
    fn insert(&mut self, kind: EventKind, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push(Listener { id, callback });
        id
    }

    /// Removes matching listeners; drops the entry once it is empty.
    fn remove_where(&mut self, kind: EventKind, predicate: impl Fn(&Listener) -> bool) -> usize {
        let Some(listeners) = self.listeners.get_mut(&kind) else {
            return 0;
        };

        let before = listeners.len();
        listeners.retain(|listener| !predicate(listener));
        let removed = before - listeners.len();

        if listeners.is_empty() {
            self.listeners.remove(&kind);
        }
        removed
    }

    fn snapshot(&self, kind: EventKind) -> Vec<Callback> {
        self.listeners
            .get(&kind)
            .map(|listeners| listeners.iter().map(|l| Rc::clone(&l.callback)).collect())
            .unwrap_or_default()
    }
}

//=== EventBus ============================================================

/// Handle to a publish/subscribe registry of [`GameEvent`]s.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `callback` for `kind`.
    ///
    /// Returns a [`Subscription`] that removes exactly this registration.
    pub fn on<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&GameEvent) + 'static,
    {
        self.subscribe(kind, Rc::new(callback))
    }

    /// Registers a shared callback for `kind`.
    ///
    /// The same `Rc` may be registered several times; each registration
    /// gets its own [`Subscription`].
    pub fn subscribe(&self, kind: EventKind, callback: Callback) -> Subscription {
        let id = self.registry.borrow_mut().insert(kind, callback);
        trace!("Listener {} subscribed to `{}`", id, kind);

        Subscription {
            registry: Rc::downgrade(&self.registry),
            kind,
            id,
            active: Cell::new(true),
        }
    }

    /// Removes every registration of `callback` for `kind`.
    ///
    /// Unknown kinds or callbacks are ignored.
    pub fn off(&self, kind: EventKind, callback: &Callback) {
        let target = Rc::as_ptr(callback) as *const ();
        let removed = self
            .registry
            .borrow_mut()
            .remove_where(kind, |l| Rc::as_ptr(&l.callback) as *const () == target);

        if removed > 0 {
            trace!("Removed {} listener(s) from `{}`", removed, kind);
        }
    }

    //--- Emission ---------------------------------------------------------

    /// Delivers `event` to every listener registered for its kind.
    ///
    /// Listeners run synchronously in registration order. Returns how many
    /// listeners completed without panicking.
    pub fn emit(&self, event: &GameEvent) -> usize {
        let kind = event.kind();
        let listeners = self.registry.borrow().snapshot(kind);

        if listeners.is_empty() {
            return 0;
        }

        trace!("Emitting `{}` to {} listener(s)", kind, listeners.len());

        let mut delivered = 0;
        for callback in listeners {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    error!("Listener for `{}` panicked: {}", kind, panic_message(&*payload));
                }
            }
        }
        delivered
    }

    //--- Query API --------------------------------------------------------

    /// Number of registrations for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Returns `true` if anything listens on `kind`.
    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.listener_count(kind) > 0
    }

    /// Drops every registration for `kind`.
    pub fn clear(&self, kind: EventKind) {
        self.registry.borrow_mut().listeners.remove(&kind);
    }

    /// Drops every registration on the bus.
    pub fn clear_all(&self) {
        self.registry.borrow_mut().listeners.clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let counts: HashMap<&str, usize> = registry
            .listeners
            .iter()
            .map(|(kind, listeners)| (kind.name(), listeners.len()))
            .collect();

        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}

//=== Subscription ========================================================

/// Handle for one registration made by [`EventBus::on`].
///
/// Dropping the handle does not unsubscribe.
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    kind: EventKind,
    id: u64,
    active: Cell<bool>,
}

impl Subscription {
    /// Removes this registration. Calling it again does nothing.
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }

        // Bus already gone: nothing left to remove from
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove_where(self.kind, |l| l.id == self.id);
            trace!("Listener {} unsubscribed from `{}`", self.id, self.kind);
        }
    }

    /// Returns `true` until [`unsubscribe`](Self::unsubscribe) is called.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
