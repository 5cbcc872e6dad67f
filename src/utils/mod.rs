//! Small shared helpers.

mod collect;
pub mod html;
mod plural;

pub use collect::ParallelCollector;
pub use plural::{plural_count, plural_s};
