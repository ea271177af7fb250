pub mod config;
pub mod sketch;
pub mod slots;

pub use config::*;
pub use sketch::*;
pub use slots::*;
