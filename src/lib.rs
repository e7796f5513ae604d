pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{RelayArgs, RelayConfig};
pub use self::core::engine::RelayEngine;
pub use self::core::github::GithubClient;
pub use domain::model::{RunConclusion, RunStatus, Workflow, WorkflowRun};
pub use utils::error::{RelayError, Result};
