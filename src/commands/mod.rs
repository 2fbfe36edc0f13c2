pub mod log;
pub mod preview;
pub mod toolbar;

// Re-export all commands
pub use log::*;
pub use preview::*;
pub use toolbar::*;
