//! Configuration loading, split by section.

pub mod logging;
pub mod polling;
pub mod report;
pub mod settings;
pub mod telegram;

pub use settings::Config;
