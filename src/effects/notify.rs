use std::sync::{Arc, Mutex, PoisonError};

use crate::optics::mode::OpticMode;

/// A property that actually changed, with its new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigChange {
    /// `mode` changed.
    Mode(OpticMode),
    /// `speedInc` changed.
    SpeedInc(i32),
    /// `threshold` changed.
    Threshold(i32),
}

/// Handle returned by [`HypnoticElement::subscribe`](crate::HypnoticElement::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(&ConfigChange) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

/// Observer list. Callbacks run synchronously on the notifying thread, outside the registry lock,
/// so a callback may read the effect or (un)subscribe without deadlocking.
#[derive(Default)]
pub(crate) struct Observers {
    registry: Mutex<Registry>,
}

impl Observers {
    pub(crate) fn subscribe(
        &self,
        callback: impl Fn(&ConfigChange) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut reg = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(reg.next_id);
        reg.next_id += 1;
        reg.callbacks.push((id, Arc::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut reg = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let before = reg.callbacks.len();
        reg.callbacks.retain(|(cid, _)| *cid != id);
        reg.callbacks.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .callbacks
            .len()
    }

    pub(crate) fn notify(&self, change: ConfigChange) {
        let callbacks: Vec<Callback> = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .callbacks
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        tracing::trace!(?change, observers = callbacks.len(), "config changed");
        for cb in callbacks {
            cb(&change);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/notify.rs"]
mod tests;
