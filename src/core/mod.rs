//! Process-level state shared by the batch driver.

mod state;

pub use state::{is_shutdown, request_shutdown, reset_shutdown, setup_shutdown_handler};
