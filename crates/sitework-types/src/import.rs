use serde::{Deserialize, Serialize};

use crate::task::Task;

/// One item of an externally authored project plan.
///
/// Items missing `name`, `start`, or `end` are skipped by the importer
/// without raising an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// 0-100 completion percentage; maps to task status on import.
    #[serde(default)]
    pub progress: Option<i64>,
}

/// Outcome of a bulk plan import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub created: usize,
    pub skipped: usize,
    pub tasks: Vec<Task>,
}
