//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the submission
//! source, storage, notification delivery, difficulty lookup and time.

pub mod clock;
pub mod difficulty;
pub mod directory;
pub mod notifier;
pub mod source;
pub mod store;
