use crate::core::logs::{self, LogFilter};
use crate::domain::model::{DispatchRequest, Workflow, WorkflowRun};
use crate::domain::ports::{ConfigProvider, WorkflowApi};
use crate::utils::error::{RelayError, Result};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// dispatch 後偵測新 run id 的輪詢間隔與上限
const DETECT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DETECT_DEADLINE: Duration = Duration::from_secs(60);

/// 等待期間進度點的最小間隔
const PROGRESS_DOT_INTERVAL: Duration = Duration::from_secs(15);

pub struct RelayEngine<A: WorkflowApi, C: ConfigProvider> {
    api: A,
    config: C,
    detect_poll_interval: Duration,
    detect_deadline: Duration,
}

impl<A: WorkflowApi, C: ConfigProvider> RelayEngine<A, C> {
    pub fn new(api: A, config: C) -> Self {
        Self {
            api,
            config,
            detect_poll_interval: DETECT_POLL_INTERVAL,
            detect_deadline: DETECT_DEADLINE,
        }
    }

    /// 調整偵測階段的輪詢參數，預設值符合 GitHub 排程 run 的延遲
    pub fn with_detection_window(mut self, poll_interval: Duration, deadline: Duration) -> Self {
        self.detect_poll_interval = poll_interval;
        self.detect_deadline = deadline;
        self
    }

    /// 執行完整的 relay 流程：
    /// 解析 workflow → 記 baseline → dispatch → 等開始 → 等結束 → 轉發日誌
    pub async fn run(&self) -> Result<WorkflowRun> {
        tracing::info!("Started");

        let workflow = self.resolve_workflow().await?;
        tracing::info!("Detected workflow id: {}", workflow.id);

        let baseline = self.api.latest_run_id(workflow.id).await?;

        let inputs: serde_json::Value = serde_json::from_str(self.config.client_payload())?;
        let request = DispatchRequest {
            git_ref: self.config.git_ref().to_string(),
            inputs,
        };
        self.api.dispatch(workflow.id, &request).await?;

        tracing::info!("Scheduled workflow run, waiting for start");
        let run_id = self.wait_for_run_start(workflow.id, baseline).await?;
        tracing::info!("Workflow started 🚀");

        let run = self.wait_for_completion(run_id).await?;

        self.relay_logs(run.id).await?;
        Ok(run)
    }

    /// 以檔名後綴比對出目標 workflow
    async fn resolve_workflow(&self) -> Result<Workflow> {
        let workflows = self.api.list_workflows().await?;
        let target = self.config.workflow_file_name();

        workflows
            .iter()
            .find(|workflow| workflow.path.ends_with(target))
            .cloned()
            .ok_or_else(|| RelayError::WorkflowNotFound {
                workflow: target.to_string(),
                available: workflows.into_iter().map(|w| w.path).collect(),
            })
    }

    /// dispatch 不會回傳 run id，只能等 runs 列表冒出比 baseline 新的 id
    async fn wait_for_run_start(&self, workflow_id: u64, baseline: Option<u64>) -> Result<u64> {
        let deadline = Instant::now() + self.detect_deadline;

        loop {
            let latest = self.api.latest_run_id(workflow_id).await?;
            match latest {
                Some(id) if baseline != Some(id) => return Ok(id),
                _ => {}
            }
            if Instant::now() >= deadline {
                return Err(RelayError::RunDetectionTimeout {
                    waited_secs: self.detect_deadline.as_secs(),
                });
            }
            sleep(self.detect_poll_interval).await;
        }
    }

    async fn wait_for_completion(&self, run_id: u64) -> Result<WorkflowRun> {
        let check_interval = Duration::from_secs(self.config.check_interval());
        let deadline = Instant::now() + Duration::from_secs(self.config.wait_timeout());

        let mut run = self.api.get_run(run_id).await?;
        tracing::info!("Real time logs can be viewed here: {}", run.html_url);
        tracing::info!("Waiting for complete...");

        let mut last_dot = Instant::now();
        while !run.is_completed() {
            if Instant::now() >= deadline {
                return Err(RelayError::WaitTimeout {
                    waited_secs: self.config.wait_timeout(),
                });
            }
            sleep(check_interval).await;
            run = self.api.get_run(run_id).await?;

            if last_dot.elapsed() >= PROGRESS_DOT_INTERVAL {
                tracing::info!(".");
                last_dot = Instant::now();
            }
        }

        Ok(run)
    }

    /// 下載日誌壓縮檔並把彙整日誌轉發到本地輸出
    async fn relay_logs(&self, run_id: u64) -> Result<()> {
        let archive = self.api.download_run_logs(run_id).await?;
        let text = logs::extract_primary_log(&archive)?;

        let filter = LogFilter::new()?;
        let mut stdout = std::io::stdout();
        let relayed = logs::relay_lines(&text, &filter, &mut stdout)?;
        tracing::debug!("Relayed {} log lines", relayed);
        Ok(())
    }
}
