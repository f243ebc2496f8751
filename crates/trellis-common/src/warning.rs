//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the parser to report input it accepts but cannot represent
//! faithfully (unknown entities, skipped declarations).

use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Warnings we've already printed, in first-seen order (to deduplicate)
static WARNED: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Warn about something recoverable (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Parser", "unknown entity reference '&nbsp;' kept verbatim");
/// ```
///
/// # Panics
/// Panics if the global warning list mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = {
        let mut warned = WARNED.lock().unwrap();
        if warned.contains(&key) {
            false
        } else {
            warned.push(key);
            true
        }
    };

    if should_print {
        let line = format!("[Trellis {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Every distinct warning recorded since the last clear, formatted as
/// `[component] message`.
///
/// # Panics
/// Panics if the global warning list mutex is poisoned.
#[must_use]
pub fn recorded_warnings() -> Vec<String> {
    WARNED.lock().unwrap().clone()
}

/// Clear all recorded warnings (call before processing a new document)
///
/// # Panics
/// Panics if the global warning list mutex is poisoned.
pub fn clear_warnings() {
    WARNED.lock().unwrap().clear();
}
