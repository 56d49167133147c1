use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scrollable::{AnimationEvent, Callback, CallbackKind, Callbacks};

#[derive(Clone, Debug, PartialEq)]
pub struct LoggedEvent {
    pub kind: CallbackKind,
    pub event: AnimationEvent,
}

/// Records every callback invocation of the [`Callbacks`] it hands out, in order.
///
/// Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct CallbackLog {
    entries: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl CallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LoggedEvent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A callback set with every hook recording into this log.
    pub fn callbacks(&self) -> Callbacks {
        let mut callbacks = Callbacks::default();
        for kind in CallbackKind::ALL {
            let entries = Arc::clone(&self.entries);
            let cb: Callback = Arc::new(move |event: &AnimationEvent| {
                entries
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(LoggedEvent {
                        kind,
                        event: *event,
                    });
            });
            callbacks.set(kind, Some(cb));
        }
        callbacks
    }

    pub fn count(&self, kind: CallbackKind) -> usize {
        self.lock().iter().filter(|e| e.kind == kind).count()
    }

    pub fn total(&self) -> usize {
        self.lock().len()
    }

    pub fn events(&self) -> Vec<LoggedEvent> {
        self.lock().clone()
    }

    /// The most recent event of `kind`.
    pub fn last(&self, kind: CallbackKind) -> Option<AnimationEvent> {
        self.lock()
            .iter()
            .rev()
            .find(|e| e.kind == kind)
            .map(|e| e.event)
    }

    /// The kinds in invocation order, skipping `step` and `progress`.
    pub fn kinds(&self) -> Vec<CallbackKind> {
        self.lock()
            .iter()
            .map(|e| e.kind)
            .filter(|k| !matches!(k, CallbackKind::Step | CallbackKind::Progress))
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
