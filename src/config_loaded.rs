//! Process-wide "configuration finished loading" flag.
//!
//! Single writer, many readers: the binary flips it once after CLI parsing and
//! logging setup are done. The schema model never reads it; it exists so a
//! harness can tell when startup has completed.
use std::sync::atomic::{AtomicBool, Ordering};

static LOADED: AtomicBool = AtomicBool::new(false);

/// Whether configuration has finished loading.
pub fn is_loaded() -> bool {
    LOADED.load(Ordering::Acquire)
}

/// Mark configuration as loaded. Returns `true` only for the call that
/// performed the transition.
pub fn mark_loaded() -> bool {
    LOADED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

/// Teardown for harnesses that restart the process state in-process.
pub fn clear() {
    LOADED.store(false, Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;

    // the only test touching the global
    #[test]
    fn set_once_read_many() {
        clear();
        assert!(!is_loaded());
        assert!(mark_loaded());
        assert!(!mark_loaded());
        assert!(is_loaded());
        assert!(is_loaded());
        clear();
        assert!(!is_loaded());
    }
}
