//! Status events emitted over the job lifecycle.
//!
//! Both the transform and transfer executors publish the same event shape,
//! so one observer can follow either kind of job. The wire format is
//! camelCase JSON tagged by `type`, e.g.
//! `{"type":"progress","id":"f1","progressAmount":10,"progressTotal":100}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StatusEvent {
    #[serde(rename_all = "camelCase")]
    Progress {
        id: String,
        progress_amount: u64,
        progress_total: u64,
    },
    Result {
        id: String,
        #[serde(flatten)]
        payload: ResultPayload,
    },
    Error { id: String, message: String },
}

/// Terminal success payload; shape depends on the kind of job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    /// Resize job: the requested target box.
    Resized { width: u32, height: u32 },
    /// Transfer job: logical address of the remote object.
    Uploaded { path: String },
}

impl StatusEvent {
    pub fn progress(id: impl Into<String>, amount: u64, total: u64) -> Self {
        StatusEvent::Progress {
            id: id.into(),
            progress_amount: amount,
            progress_total: total,
        }
    }

    pub fn resized(id: impl Into<String>, width: u32, height: u32) -> Self {
        StatusEvent::Result {
            id: id.into(),
            payload: ResultPayload::Resized { width, height },
        }
    }

    pub fn uploaded(id: impl Into<String>, path: impl Into<String>) -> Self {
        StatusEvent::Result {
            id: id.into(),
            payload: ResultPayload::Uploaded { path: path.into() },
        }
    }

    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        StatusEvent::Error {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Correlation id of the job that produced this event.
    pub fn job_id(&self) -> &str {
        match self {
            StatusEvent::Progress { id, .. }
            | StatusEvent::Result { id, .. }
            | StatusEvent::Error { id, .. } => id,
        }
    }
}
