//! Project detail dialogs
//!
//! Each dialog is either open or closed, and at most one is open at a time. While a
//! dialog is open the page's scroll is locked. The lock is a single flag that is set
//! and cleared, never counted.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// Page-wide scroll lock flag
#[derive(Debug, Default)]
pub struct ScrollLock {
    locked: Cell<bool>,
}

impl ScrollLock {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn lock(&self) {
        self.locked.set(true);
    }

    pub fn unlock(&self) {
        self.locked.set(false);
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }
}

/// A dialog visibility change the host must apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalChange {
    pub id: String,
    pub open: bool,
    pub scroll_locked: bool,
}

#[derive(Debug)]
pub struct ModalController {
    open: HashMap<String, bool>,
    scroll: Rc<ScrollLock>,
}

impl ModalController {
    /// Manage the dialogs named by `ids`; every other id is ignored
    pub fn new<I, S>(ids: I, scroll: Rc<ScrollLock>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            open: ids.into_iter().map(|id| (id.into(), false)).collect(),
            scroll,
        }
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.get(id).copied().unwrap_or(false)
    }

    /// Id of the open dialog, if any
    pub fn current(&self) -> Option<&str> {
        self.open
            .iter()
            .find_map(|(id, &open)| open.then_some(id.as_str()))
    }

    /// Open `id`, closing whichever dialog was open before. Returns the changes in
    /// the order they should be applied.
    pub fn open(&mut self, id: &str) -> Vec<ModalChange> {
        if !self.open.contains_key(id) || self.is_open(id) {
            return Vec::new();
        }

        let mut changes = Vec::with_capacity(2);
        if let Some(previous) = self.current().map(str::to_owned) {
            changes.extend(self.close(&previous));
        }

        self.open.insert(id.to_owned(), true);
        self.scroll.lock();
        log::debug!("Opened dialog {}", id);
        changes.push(ModalChange {
            id: id.to_owned(),
            open: true,
            scroll_locked: true,
        });
        changes
    }

    /// Close `id` if it is open
    pub fn close(&mut self, id: &str) -> Option<ModalChange> {
        if !self.is_open(id) {
            return None;
        }
        self.open.insert(id.to_owned(), false);
        self.scroll.unlock();
        Some(ModalChange {
            id: id.to_owned(),
            open: false,
            scroll_locked: false,
        })
    }

    /// A click landed somewhere on dialog `id`. Only clicks on the backdrop itself
    /// (not the inner panel) close it.
    pub fn backdrop_click(&mut self, id: &str, on_backdrop: bool) -> Option<ModalChange> {
        if on_backdrop { self.close(id) } else { None }
    }

    /// Escape key closes whatever is open
    pub fn escape(&mut self) -> Option<ModalChange> {
        let id = self.current()?.to_owned();
        self.close(&id)
    }
}
