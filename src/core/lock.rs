//! Reader/writer exclusion over a category.
//!
//! A category behaves like a readers-writer lock whose state is derived from
//! the running-instance snapshot on every call:
//!
//! - `Idle`: nothing running; readers and writers may start.
//! - `ReadersActive(n)`: members without a running writer; more readers may
//!   start, writers may not.
//! - `WriterActive`: a writer member is running; nobody may start.
//!
//! Only the cluster-wide check derives this state. The per-node check counts
//! running members but never consults the lock, so a writer running on
//! another node does not block a reader's placement on this one.

use super::{CauseOfBlockage, Role};

/// Lock state of a category as derived from running members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLockState {
    /// No member running.
    Idle,
    /// Members running, none of them a writer.
    ReadersActive(u32),
    /// A writer member is running.
    WriterActive,
}

/// Running-member summary collected while walking a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryLock {
    /// Some member holding the writer role has a running instance.
    pub writer_locked: bool,
    /// Running instances of all members, any role.
    pub running: u32,
}

impl CategoryLock {
    /// Fold one member's running count into the summary.
    pub fn observe(&mut self, running: u32, is_writer: bool) {
        if running > 0 && is_writer {
            self.writer_locked = true;
        }
        self.running = self.running.saturating_add(running);
    }

    /// Whether any member is running.
    pub const fn any_running(&self) -> bool {
        self.running > 0
    }

    /// Conceptual lock state.
    pub const fn state(&self) -> CategoryLockState {
        if self.writer_locked {
            CategoryLockState::WriterActive
        } else if self.running > 0 {
            CategoryLockState::ReadersActive(self.running)
        } else {
            CategoryLockState::Idle
        }
    }

    /// Verdict for a requester holding `role`. Numeric caps are checked by the
    /// caller before this.
    pub const fn evaluate(&self, role: Option<Role>) -> Option<CauseOfBlockage> {
        match role {
            Some(Role::Writer) if self.writer_locked || self.any_running() => {
                Some(CauseOfBlockage::WriterLock)
            }
            Some(Role::Reader) if self.writer_locked => Some(CauseOfBlockage::ReaderLock),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lock(members: &[(u32, bool)]) -> CategoryLock {
        let mut lock = CategoryLock::default();
        for &(running, writer) in members {
            lock.observe(running, writer);
        }
        lock
    }

    #[test]
    fn idle_admits_everyone() {
        let idle = lock(&[(0, true), (0, false)]);
        assert_eq!(idle.state(), CategoryLockState::Idle);
        assert_eq!(idle.evaluate(Some(Role::Writer)), None);
        assert_eq!(idle.evaluate(Some(Role::Reader)), None);
        assert_eq!(idle.evaluate(None), None);
    }

    #[test]
    fn readers_share_but_exclude_writers() {
        let readers = lock(&[(2, false), (0, true)]);
        assert_eq!(readers.state(), CategoryLockState::ReadersActive(2));
        assert_eq!(readers.evaluate(Some(Role::Reader)), None);
        assert_eq!(
            readers.evaluate(Some(Role::Writer)),
            Some(CauseOfBlockage::WriterLock)
        );
    }

    #[test]
    fn writer_excludes_everyone_with_a_role() {
        let writer = lock(&[(1, true), (0, false)]);
        assert_eq!(writer.state(), CategoryLockState::WriterActive);
        assert_eq!(
            writer.evaluate(Some(Role::Reader)),
            Some(CauseOfBlockage::ReaderLock)
        );
        assert_eq!(
            writer.evaluate(Some(Role::Writer)),
            Some(CauseOfBlockage::WriterLock)
        );
        assert_eq!(writer.evaluate(None), None);
    }
}
