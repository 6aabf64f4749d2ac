//! Access to the shell's URL.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::Rng;

use crate::hash::base36;
use crate::location::{HistoryAction, Location};
use crate::machine::ShellEvent;

/// Reads and rewrites the current URL.
///
/// `replace` swaps the current entry in place: no new history entry, and no
/// navigation event.
pub trait Navigator: Send + Sync {
    fn location(&self) -> Location;
    fn replace(&self, location: Location);
}

/// An in-memory history stack (entries plus a cursor), for tests and the CLI.
///
/// `push` and `back` return the [`ShellEvent`] a router would emit so callers
/// can feed it to the flow.
#[derive(Debug)]
pub struct MemoryHistory {
    inner: Mutex<Entries>,
}

#[derive(Debug)]
struct Entries {
    stack: Vec<Location>,
    cursor: usize,
}

impl MemoryHistory {
    /// A history whose only entry is a fresh page load at `href` (no key).
    pub fn new(href: &str) -> Self {
        Self {
            inner: Mutex::new(Entries { stack: vec![Location::parse(href)], cursor: 0 }),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigate to `href`, dropping any forward entries.
    pub fn push(&self, href: &str) -> ShellEvent {
        let mut location = Location::parse(href);
        location.key = Some(new_key());

        let mut e = self.entries();
        let next = e.cursor + 1;
        e.stack.truncate(next);
        e.stack.push(location.clone());
        e.cursor = next;
        ShellEvent::Navigate { location, action: HistoryAction::Push }
    }

    /// Step back one entry. `None` at the start of history.
    pub fn back(&self) -> Option<ShellEvent> {
        let mut e = self.entries();
        if e.cursor == 0 {
            return None;
        }
        e.cursor -= 1;
        let location = e.stack[e.cursor].clone();
        Some(ShellEvent::Navigate { location, action: HistoryAction::Pop })
    }

    pub fn len(&self) -> usize {
        self.entries().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().stack.is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> Location {
        let e = self.entries();
        e.stack[e.cursor].clone()
    }

    fn replace(&self, location: Location) {
        let mut e = self.entries();
        let cursor = e.cursor;
        e.stack[cursor] = location;
    }
}

/// Six base-36 characters, like a browser router's entry keys.
fn new_key() -> String {
    let n: u64 = rand::rng().random_range(36u64.pow(5)..36u64.pow(6));
    base36(n)
}
