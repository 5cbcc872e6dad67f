//! Process-wide run state.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//! - `INTERRUPTS`: How many times? A second Ctrl+C exits immediately.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Ctrl+C presses seen so far
static INTERRUPTS: AtomicUsize = AtomicUsize::new(0);

/// Setup the global Ctrl+C handler. Call once at program start.
///
/// The first Ctrl+C only sets the flag: batch workers finish the record in
/// hand and stop picking up new ones. A second Ctrl+C exits at once.
pub fn setup_shutdown_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        if INTERRUPTS.fetch_add(1, Ordering::SeqCst) > 0 {
            std::process::exit(130);
        }
        SHUTDOWN.store(true, Ordering::SeqCst);
        crate::log!("migrate"; "interrupted, finishing records in progress (Ctrl+C again to abort)");
    })
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering: worst case a worker converts one more record
/// before noticing.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Request shutdown without a signal (tests, embedding callers).
pub fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Clear a previous shutdown request.
pub fn reset_shutdown() {
    SHUTDOWN.store(false, Ordering::SeqCst);
    INTERRUPTS.store(0, Ordering::SeqCst);
}
