//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!     CLI / bot ────►│  inbound::tracking      │
//!                    │                         │
//!                    │      Application        │
//!                    └──────────┬──────────────┘
//!          ┌────────────┬───────┴─────┬──────────────┐
//!          ▼            ▼             ▼              ▼
//!     ┌─────────┐  ┌─────────┐  ┌───────────┐  ┌────────────┐
//!     │ Source  │  │  Store  │  │   Sink    │  │ Difficulty │
//!     └─────────┘  └─────────┘  └───────────┘  └────────────┘
//! ```

pub mod inbound;
pub mod outbound;
