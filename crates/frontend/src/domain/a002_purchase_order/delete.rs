//! Per-row delete lifecycle.
//!
//! ```text
//! Idle -> ConfirmPending -> Deleting -> DeletedTransient -> Idle (after refetch)
//!              |                 |
//!              +-> Idle (cancel) +-> Idle (failure)
//! ```

use crate::shared::deferred::Scheduler;
use contracts::domain::a002_purchase_order::PurchaseOrderId;
use log::{debug, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowDeleteState {
    #[default]
    Idle,
    ConfirmPending,
    Deleting,
    /// Deleted on the server; the row stays marked until the list refetches.
    DeletedTransient,
}

/// Delete state of every row that is not idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteTracker {
    rows: HashMap<PurchaseOrderId, RowDeleteState>,
}

impl DeleteTracker {
    pub fn state(&self, id: &PurchaseOrderId) -> RowDeleteState {
        self.rows.get(id).copied().unwrap_or_default()
    }

    fn transition(
        &mut self,
        id: &PurchaseOrderId,
        from: RowDeleteState,
        to: RowDeleteState,
    ) -> bool {
        let current = self.state(id);
        if current != from {
            warn!(
                "ignoring delete transition {:?} -> {:?} for {}: row is {:?}",
                from, to, id, current
            );
            return false;
        }
        debug!("row {}: {:?} -> {:?}", id, from, to);
        if to == RowDeleteState::Idle {
            self.rows.remove(id);
        } else {
            self.rows.insert(id.clone(), to);
        }
        true
    }

    /// The user clicked delete; a confirmation is about to be shown.
    pub fn request(&mut self, id: &PurchaseOrderId) -> bool {
        self.transition(id, RowDeleteState::Idle, RowDeleteState::ConfirmPending)
    }

    pub fn cancel(&mut self, id: &PurchaseOrderId) -> bool {
        self.transition(id, RowDeleteState::ConfirmPending, RowDeleteState::Idle)
    }

    /// Confirmed; the delete request is being sent.
    pub fn confirm(&mut self, id: &PurchaseOrderId) -> bool {
        self.transition(id, RowDeleteState::ConfirmPending, RowDeleteState::Deleting)
    }

    pub fn succeed(&mut self, id: &PurchaseOrderId) -> bool {
        self.transition(id, RowDeleteState::Deleting, RowDeleteState::DeletedTransient)
    }

    pub fn fail(&mut self, id: &PurchaseOrderId) -> bool {
        self.transition(id, RowDeleteState::Deleting, RowDeleteState::Idle)
    }

    /// The list was refetched after a delete; the row is gone or stale.
    pub fn settle_after_refetch(&mut self, id: &PurchaseOrderId) -> bool {
        self.transition(id, RowDeleteState::DeletedTransient, RowDeleteState::Idle)
    }

    /// Rows rendered with the "deleting" mark.
    pub fn is_marked(&self, id: &PurchaseOrderId) -> bool {
        matches!(
            self.state(id),
            RowDeleteState::Deleting | RowDeleteState::DeletedTransient
        )
    }

    /// A delete is underway for this row, so its delete button is disabled.
    pub fn is_busy(&self, id: &PurchaseOrderId) -> bool {
        self.state(id) != RowDeleteState::Idle
    }
}

/// The list a finished delete reports back to.
pub trait DeleteHost: 'static {
    fn update_deletes(&self, f: &mut dyn FnMut(&mut DeleteTracker));

    /// Reload the page currently shown.
    fn refetch(&self);
}

/// The service confirmed the delete of `id`.
///
/// The row stays marked until `delay_ms` has passed; then the mark is cleared
/// and the page is reloaded, which is what removes the row.
pub fn follow_up_delete<S, H>(scheduler: &S, host: H, id: PurchaseOrderId, delay_ms: u32)
where
    S: Scheduler,
    H: DeleteHost,
{
    host.update_deletes(&mut |deletes| {
        deletes.succeed(&id);
    });
    scheduler.schedule(
        delay_ms,
        Box::new(move || {
            host.update_deletes(&mut |deletes| {
                deletes.settle_after_refetch(&id);
            });
            host.refetch();
        }),
    );
}
