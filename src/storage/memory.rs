//! In-process backend for tests and ephemeral sessions.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Persistence, decode, encode};
use crate::core::state::ProfileState;
use crate::error::{Result, SgError};

#[derive(Debug, Default)]
struct Inner {
    document: Option<String>,
    saves: usize,
    fail: bool,
}

/// Keeps the encoded document in memory.
///
/// Clones share the same slot, so a test can hand one handle to a store and
/// inspect what was written through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every operation fails.
    #[must_use]
    pub fn failing() -> Self {
        let storage = Self::default();
        storage.set_failing(true);
        storage
    }

    pub fn set_failing(&self, fail: bool) {
        self.inner.borrow_mut().fail = fail;
    }

    /// Seed the slot with a raw document, bypassing encoding.
    pub fn seed_raw(&self, raw: impl Into<String>) {
        self.inner.borrow_mut().document = Some(raw.into());
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    /// Decoded view of the stored document.
    #[must_use]
    pub fn snapshot(&self) -> Option<ProfileState> {
        let inner = self.inner.borrow();
        inner.document.as_deref().and_then(|raw| decode(raw, "memory"))
    }

    fn check(&self) -> Result<()> {
        if self.inner.borrow().fail {
            return Err(SgError::Storage("memory storage set to fail".to_string()));
        }
        Ok(())
    }
}

impl Persistence for MemoryStorage {
    fn save(&self, state: &ProfileState) -> Result<()> {
        self.check()?;
        let document = encode(state)?;
        let mut inner = self.inner.borrow_mut();
        inner.document = Some(document);
        inner.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<ProfileState>> {
        self.check()?;
        Ok(self.snapshot())
    }

    fn clear(&self) -> Result<()> {
        self.check()?;
        self.inner.borrow_mut().document = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
