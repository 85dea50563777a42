//! Reconcile Fills Use Case
//!
//! Applies broker-reported fills to stored broker orders in bulk.

use std::sync::Arc;

use tracing::Span;

use crate::config::ReconciliationConfig;
use crate::domain::broker_order::repository::BrokerOrderRepository;
use crate::domain::broker_order::{BrokerOrder, ReconcileOutcome, TradeQuantity};
use crate::domain::shared::OrderId;

/// A stored order paired with the broker's view of it.
#[derive(Debug, Clone)]
pub struct MatchedFill {
    /// Id of the stored broker order.
    pub order_id: OrderId,
    /// Order as reported by the broker, carrying the fill.
    pub matched: BrokerOrder,
}

/// A matched fill that was not applied because it exceeds the trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFill {
    /// Stored order id.
    pub order_id: OrderId,
    /// Stored order's trade.
    pub trade: TradeQuantity,
    /// Fill the broker reported.
    pub matched_fill: TradeQuantity,
}

/// Outcome of a reconciliation batch.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationReport {
    /// Matched fills examined.
    pub total_checked: usize,
    /// Orders updated and saved.
    pub reconciled: Vec<OrderId>,
    /// Fills exceeding their trade.
    pub rejected: Vec<RejectedFill>,
    /// Orders skipped because they are locked.
    pub skipped_locked: Vec<OrderId>,
    /// Ids with no stored order.
    pub missing: Vec<OrderId>,
    /// Repository failures.
    pub errors: Vec<String>,
    /// Batch stopped early at a rejected fill.
    pub halted: bool,
}

impl ReconciliationReport {
    /// Check if every matched fill was applied.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.rejected.is_empty()
            && self.skipped_locked.is_empty()
            && self.missing.is_empty()
            && self.errors.is_empty()
            && !self.halted
    }
}

/// Use case for applying broker-reported fills to stored orders.
pub struct ReconcileFillsUseCase<R>
where
    R: BrokerOrderRepository,
{
    order_repo: Arc<R>,
    config: ReconciliationConfig,
}

impl<R> ReconcileFillsUseCase<R>
where
    R: BrokerOrderRepository,
{
    /// Create a new ReconcileFillsUseCase.
    pub const fn new(order_repo: Arc<R>, config: ReconciliationConfig) -> Self {
        Self { order_repo, config }
    }

    /// Apply each matched fill to its stored order.
    pub async fn execute(&self, fills: Vec<MatchedFill>) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();

        for fill in fills {
            report.total_checked += 1;
            let order_id = fill.order_id;

            let mut order = match self.order_repo.find_by_id(order_id).await {
                Ok(Some(order)) => order,
                Ok(None) => {
                    tracing::warn!(order_id = %order_id, "No stored broker order for matched fill");
                    report.missing.push(order_id);
                    continue;
                }
                Err(e) => {
                    report
                        .errors
                        .push(format!("Failed to load broker order {order_id}: {e}"));
                    continue;
                }
            };

            if order.is_locked() {
                tracing::info!(order_id = %order_id, "Broker order locked, skipping fill");
                report.skipped_locked.push(order_id);
                continue;
            }

            let span = order.log_with_attributes(&Span::current());
            let outcome =
                span.in_scope(|| order.add_execution_details_from_matched_broker_order(&fill.matched));

            match outcome {
                ReconcileOutcome::FillExceedsTrade => {
                    report.rejected.push(RejectedFill {
                        order_id,
                        trade: order.trade().clone(),
                        matched_fill: fill.matched.fill().clone(),
                    });
                    if self.config.halt_on_fill_exceeds_trade {
                        report.halted = true;
                        break;
                    }
                }
                ReconcileOutcome::Success => match self.order_repo.save(&order).await {
                    Ok(_) => report.reconciled.push(order_id),
                    Err(e) => report
                        .errors
                        .push(format!("Failed to save reconciled order {order_id}: {e}")),
                },
            }
        }

        tracing::info!(
            total_checked = report.total_checked,
            reconciled = report.reconciled.len(),
            rejected = report.rejected.len(),
            skipped_locked = report.skipped_locked.len(),
            missing = report.missing.len(),
            errors = report.errors.len(),
            halted = report.halted,
            "Fill reconciliation complete"
        );

        report
    }
}
