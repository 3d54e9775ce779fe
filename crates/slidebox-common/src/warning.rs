//! Layout warnings with colored terminal output.
//!
//! Each unique `[component] message` pair is printed once until
//! [`clear_warnings`] is called, typically between documents.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Warnings already reported in this session.
static REPORTED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// When set, warnings are still recorded but nothing is printed.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Report a warning once per unique message.
///
/// Returns `true` if this call was the first report of the message.
///
/// # Example
/// ```ignore
/// warn_once("Layout", "unknown display mode 'flex' on node 'cards', using stack");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first = REPORTED.lock().unwrap().insert(key);

    if first && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{YELLOW}[slidebox {component}] warning: {message}{RESET}");
    }
    first
}

/// Suppress (or restore) terminal output of warnings.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Forget all reported warnings (call when starting a new document).
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    REPORTED.lock().unwrap().clear();
}
