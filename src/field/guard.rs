use std::cell::Cell;
use std::rc::Rc;

/// Single-flight flag for reformat passes. Not `Clone`: every field owns its
/// own flag.
#[derive(Debug, Default)]
pub struct ReformatFlag {
    active: Rc<Cell<bool>>,
}

impl ReformatFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Returns `None` while another pass holds the flag.
    pub fn acquire(&self) -> Option<ReformatGuard> {
        if self.active.replace(true) {
            return None;
        }
        Some(ReformatGuard {
            active: Rc::clone(&self.active),
        })
    }
}

/// Clears the flag when dropped.
#[derive(Debug)]
pub struct ReformatGuard {
    active: Rc<Cell<bool>>,
}

impl Drop for ReformatGuard {
    fn drop(&mut self) {
        self.active.set(false);
    }
}
