use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub status: RunStatus,
    #[serde(default)]
    pub conclusion: Option<RunConclusion>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
}

impl WorkflowRun {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn succeeded(&self) -> bool {
        self.conclusion == Some(RunConclusion::Success)
    }
}

/// GitHub 會持續新增 run 狀態，未知值一律落到 Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Waiting,
    Requested,
    Pending,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunConclusion {
    Success,
    Failure,
    Cancelled,
    TimedOut,
    Neutral,
    Skipped,
    ActionRequired,
    StartupFailure,
    #[serde(other)]
    Other,
}

impl fmt::Display for RunConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunConclusion::Success => "success",
            RunConclusion::Failure => "failure",
            RunConclusion::Cancelled => "cancelled",
            RunConclusion::TimedOut => "timed_out",
            RunConclusion::Neutral => "neutral",
            RunConclusion::Skipped => "skipped",
            RunConclusion::ActionRequired => "action_required",
            RunConclusion::StartupFailure => "startup_failure",
            RunConclusion::Other => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// workflow_dispatch 的請求內容
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRequest {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub inputs: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_workflow_run() {
        let json = serde_json::json!({
            "id": 30433642,
            "status": "in_progress",
            "conclusion": null,
            "html_url": "https://github.com/octocat/hello/actions/runs/30433642",
            "created_at": "2026-01-05T12:30:00Z",
            "run_number": 562,
            "event": "workflow_dispatch"
        });

        let run: WorkflowRun = serde_json::from_value(json).unwrap();
        assert_eq!(run.id, 30433642);
        assert_eq!(run.status, RunStatus::InProgress);
        assert!(run.conclusion.is_none());
        assert!(!run.is_completed());
    }

    #[test]
    fn test_unknown_status_falls_back_to_other() {
        let status: RunStatus = serde_json::from_str("\"brand_new_state\"").unwrap();
        assert_eq!(status, RunStatus::Other);

        let conclusion: RunConclusion = serde_json::from_str("\"stale\"").unwrap();
        assert_eq!(conclusion, RunConclusion::Other);
    }

    #[test]
    fn test_dispatch_request_uses_ref_key() {
        let request = DispatchRequest {
            git_ref: "master".to_string(),
            inputs: serde_json::json!({"env": "staging"}),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["ref"], "master");
        assert_eq!(body["inputs"]["env"], "staging");
    }
}
