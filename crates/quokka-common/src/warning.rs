//! Deduplicated recovery warnings.
//!
//! The parser repairs a lot of markup damage silently as far as the parse
//! status is concerned; each repair is reported here instead. Damaged
//! documents tend to repeat the same mistake hundreds of times, so every
//! unique component/message pair prints at most once until the set is
//! cleared.

use std::collections::HashSet;
use std::sync::Mutex;

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Component/message pairs already reported.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Report a recovered condition on stderr, at most once per unique
/// component/message pair.
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "implicitly closed <TD> before <TR>");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[Quokka {component}] ⚠ {message}{RESET}");
    }
}

/// Forget every reported pair so the next document gets fresh warnings.
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
