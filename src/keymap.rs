//! Scoped key subscriptions.
//!
//! Elements that need a key while they are on screen (the header closing
//! its menu on Escape) subscribe when mounted and hold the returned
//! [`Subscription`].  Dropping the guard removes the binding, so nothing
//! outlives the element that asked for it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossterm::event::KeyCode;

/// What a subscribed key asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CloseMenu,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    bindings: Vec<(u64, KeyCode, Action)>,
}

/// Shared table of live subscriptions.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    registry: Rc<RefCell<Registry>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action` until the returned guard is dropped.
    #[must_use = "the binding is removed when the subscription is dropped"]
    pub fn subscribe(&self, key: KeyCode, action: Action) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.bindings.push((id, key, action));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Action bound to `key`; the most recent subscription wins.
    pub fn lookup(&self, key: KeyCode) -> Option<Action> {
        self.registry
            .borrow()
            .bindings
            .iter()
            .rev()
            .find(|(_, bound, _)| *bound == key)
            .map(|(_, _, action)| *action)
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().bindings.is_empty()
    }
}

/// Live binding; removed from its [`Keymap`] on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .bindings
                .retain(|(id, _, _)| *id != self.id);
        }
    }
}
