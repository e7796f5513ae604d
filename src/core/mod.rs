pub mod engine;
pub mod github;
pub mod logs;

pub use crate::domain::model::{DispatchRequest, Workflow, WorkflowRun};
pub use crate::domain::ports::{ConfigProvider, WorkflowApi};
pub use crate::utils::error::Result;
