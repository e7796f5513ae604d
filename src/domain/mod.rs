pub mod model;
pub mod ports;

pub use model::{DispatchRequest, RunConclusion, RunStatus, Workflow, WorkflowRun};
pub use ports::{ConfigProvider, WorkflowApi};
