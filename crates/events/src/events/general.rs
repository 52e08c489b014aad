use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Operation lifecycle events shared by every command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneralEvent {
    OperationStarted {
        operation: String,
    },

    OperationCompleted {
        operation: String,
        success: bool,
    },

    OperationFailed {
        operation: String,
        failure: FailureContext,
    },
}
