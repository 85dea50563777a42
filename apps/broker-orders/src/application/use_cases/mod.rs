//! Application Use Cases

mod reconcile_fills;

pub use reconcile_fills::{
    MatchedFill, ReconcileFillsUseCase, ReconciliationReport, RejectedFill,
};
