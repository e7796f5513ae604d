use crate::domain::model::{DispatchRequest, Workflow, WorkflowRun};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn list_workflows(&self) -> Result<Vec<Workflow>>;
    async fn latest_run_id(&self, workflow_id: u64) -> Result<Option<u64>>;
    async fn dispatch(&self, workflow_id: u64, request: &DispatchRequest) -> Result<()>;
    async fn get_run(&self, run_id: u64) -> Result<WorkflowRun>;
    async fn download_run_logs(&self, run_id: u64) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn repo_owner(&self) -> &str;
    fn repo_name(&self) -> &str;
    fn workflow_file_name(&self) -> &str;
    fn git_ref(&self) -> &str;
    fn check_interval(&self) -> u64;
    fn wait_timeout(&self) -> u64;
    fn client_payload(&self) -> &str;
}
