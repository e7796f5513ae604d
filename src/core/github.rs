use crate::domain::model::{DispatchRequest, Workflow, WorkflowRun};
use crate::domain::ports::WorkflowApi;
use crate::utils::error::{RelayError, Result};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("workflow-relay/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowListResponse {
    workflows: Vec<Workflow>,
}

#[derive(Debug, Deserialize)]
struct RunListResponse {
    workflow_runs: Vec<RunSummary>,
}

#[derive(Debug, Deserialize)]
struct RunSummary {
    id: u64,
}

impl GithubClient {
    pub fn new(api_base_url: &str, owner: &str, repo: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: api_base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/actions{}",
            self.base_url, self.owner, self.repo, path
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
    }

    fn check_status(&self, response: reqwest::Response, endpoint: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::error!(
                "Provided token has no permissions to access the remote repo actions"
            );
            return Err(RelayError::AuthError {
                owner: self.owner.clone(),
                repo: self.repo.clone(),
            });
        }
        if !status.is_success() {
            return Err(RelayError::ApiStatusError {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl WorkflowApi for GithubClient {
    async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        let url = self.endpoint("/workflows");
        tracing::debug!("📡 Making API request to: {}", url);

        let response = self.get(&url).send().await?;
        tracing::debug!("📡 API response status: {}", response.status());

        let response = self.check_status(response, &url)?;
        let body: WorkflowListResponse = response.json().await?;
        Ok(body.workflows)
    }

    async fn latest_run_id(&self, workflow_id: u64) -> Result<Option<u64>> {
        let url = self.endpoint(&format!("/workflows/{}/runs", workflow_id));
        let response = self.get(&url).query(&[("per_page", "1")]).send().await?;
        let response = self.check_status(response, &url)?;

        let body: RunListResponse = response.json().await?;
        Ok(body.workflow_runs.first().map(|run| run.id))
    }

    async fn dispatch(&self, workflow_id: u64, request: &DispatchRequest) -> Result<()> {
        let url = self.endpoint(&format!("/workflows/{}/dispatches", workflow_id));
        tracing::debug!("📡 Dispatching workflow {} on ref {}", workflow_id, request.git_ref);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(request)
            .send()
            .await?;

        // 成功時回 204，沒有 body
        self.check_status(response, &url)?;
        Ok(())
    }

    async fn get_run(&self, run_id: u64) -> Result<WorkflowRun> {
        let url = self.endpoint(&format!("/runs/{}", run_id));
        let response = self.get(&url).send().await?;
        let response = self.check_status(response, &url)?;

        let run: WorkflowRun = response.json().await?;
        Ok(run)
    }

    async fn download_run_logs(&self, run_id: u64) -> Result<Vec<u8>> {
        // 固定抓第一次 attempt 的日誌
        let url = self.endpoint(&format!("/runs/{}/attempts/1/logs", run_id));
        tracing::debug!("📡 Downloading run logs from: {}", url);

        let response = self.get(&url).send().await?;
        let response = self.check_status(response, &url)?;

        let data = response.bytes().await?;
        Ok(data.to_vec())
    }
}
