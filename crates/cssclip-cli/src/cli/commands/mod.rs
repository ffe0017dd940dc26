//! CLI command handlers. Each command is in its own file.

mod link;
mod scan;
mod shared;
mod text;

pub use link::run_link;
pub use scan::run_scan;
pub use text::run_text;
