//! Per-entity reconciliation: diff recent submissions against the watermark,
//! update solve history, and fan out notifications.

mod message;
mod reconciler;

pub use message::{problem_url, render_solve};
pub use reconciler::{ReconcileOutcome, Reconciler};
