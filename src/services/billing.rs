//! Fire-and-forget billing trigger.
//!
//! When a billable task transitions into `done`, the task store signals the
//! downstream billing system through this notifier. The signal is
//! best-effort: a send failure is logged and never surfaces to the request
//! that completed the task. Invoice creation itself happens elsewhere.

use tokio::sync::mpsc;

/// A billable task crossed into `done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillableCompletion {
    pub task_id: i64,
    pub project_id: i64,
    pub title: String,
}

/// Cloneable handle for signaling billable completions.
#[derive(Debug, Clone)]
pub struct BillingNotifier {
    sender: mpsc::UnboundedSender<BillableCompletion>,
}

impl BillingNotifier {
    /// Create a notifier and the receiving end for the billing consumer.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BillableCompletion>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Signal a completion. Failures (consumer gone) are logged and dropped.
    pub fn notify(&self, completion: BillableCompletion) {
        if let Err(e) = self.sender.send(completion) {
            tracing::warn!(task_id = e.0.task_id, "billing signal dropped, no consumer");
        }
    }
}

/// Drain billing signals, logging each one. Stands in for the external
/// billing collaborator in deployments without one attached.
pub fn spawn_billing_logger(mut receiver: mpsc::UnboundedReceiver<BillableCompletion>) {
    tokio::spawn(async move {
        while let Some(completion) = receiver.recv().await {
            tracing::info!(
                task_id = completion.task_id,
                project_id = completion.project_id,
                title = %completion.title,
                "billable task completed"
            );
        }
    });
}
