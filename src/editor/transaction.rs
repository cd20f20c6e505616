//! Scoped undo transaction

use std::ops::{Deref, DerefMut};

use super::UndoHistory;

/// Groups every edit made through it into one undo step.
///
/// Dropping the transaction without calling [`Transaction::complete`]
/// rolls the edits back.
pub struct Transaction<'a, H: UndoHistory + ?Sized> {
    host: &'a mut H,
    completed: bool,
}

impl<'a, H: UndoHistory + ?Sized> Transaction<'a, H> {
    pub fn begin(host: &'a mut H, label: &str) -> Self {
        host.begin_transaction(label);
        Self {
            host,
            completed: false,
        }
    }

    pub fn complete(mut self) {
        self.completed = true;
        self.host.complete_transaction();
    }
}

impl<H: UndoHistory + ?Sized> Deref for Transaction<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: UndoHistory + ?Sized> DerefMut for Transaction<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: UndoHistory + ?Sized> Drop for Transaction<'_, H> {
    fn drop(&mut self) {
        if !self.completed {
            self.host.rollback_transaction();
        }
    }
}
