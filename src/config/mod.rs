pub mod file;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use file::FileConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Parser)]
#[command(name = "workflow-relay")]
#[command(about = "Trigger a remote GitHub Actions workflow, wait for it and relay its logs")]
pub struct RelayArgs {
    /// TOML 配置檔，個別 CLI 參數優先
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub repo_owner: Option<String>,

    #[arg(long)]
    pub repo_name: Option<String>,

    #[arg(long, help = "Workflow file name, matched as a suffix of the workflow path")]
    pub workflow_file_name: Option<String>,

    #[arg(long, help = "Falls back to the GITHUB_TOKEN environment variable")]
    pub github_token: Option<String>,

    #[arg(long)]
    pub git_ref: Option<String>,

    #[arg(long, help = "Seconds between completion polls")]
    pub check_interval: Option<u64>,

    #[arg(long, help = "Seconds to wait for the remote run to finish")]
    pub wait_timeout: Option<u64>,

    #[arg(long, help = "JSON object passed to the workflow as dispatch inputs")]
    pub client_payload: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 合併 CLI、配置檔與環境變數後的完整配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub repo_owner: String,
    pub repo_name: String,
    pub workflow_file_name: String,
    pub github_token: String,
    pub git_ref: String,
    pub check_interval: u64,
    pub wait_timeout: u64,
    pub client_payload: String,
    pub api_base_url: String,
    pub verbose: bool,
}

impl RelayConfig {
    /// 解析優先序：CLI 參數 > 配置檔 > 環境變數 > 預設值
    pub fn resolve(args: RelayArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let repo_owner = args.repo_owner.or(file.repo_owner);
        let repo_name = args.repo_name.or(file.repo_name);
        let workflow_file_name = args.workflow_file_name.or(file.workflow_file_name);
        let github_token = args
            .github_token
            .or(file.github_token)
            .or_else(|| std::env::var("GITHUB_TOKEN").ok());

        Ok(Self {
            repo_owner: validation::validate_required_field("repo_owner", &repo_owner)?.clone(),
            repo_name: validation::validate_required_field("repo_name", &repo_name)?.clone(),
            workflow_file_name: validation::validate_required_field(
                "workflow_file_name",
                &workflow_file_name,
            )?
            .clone(),
            github_token: validation::validate_required_field("github_token", &github_token)?
                .clone(),
            git_ref: args
                .git_ref
                .or(file.git_ref)
                .unwrap_or_else(|| "master".to_string()),
            check_interval: args.check_interval.or(file.check_interval).unwrap_or(5),
            wait_timeout: args.wait_timeout.or(file.wait_timeout).unwrap_or(600),
            client_payload: args
                .client_payload
                .or(file.client_payload)
                .unwrap_or_else(|| "{}".to_string()),
            api_base_url: args
                .api_base_url
                .or(file.api_base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            verbose: args.verbose,
        })
    }
}

impl ConfigProvider for RelayConfig {
    fn repo_owner(&self) -> &str {
        &self.repo_owner
    }

    fn repo_name(&self) -> &str {
        &self.repo_name
    }

    fn workflow_file_name(&self) -> &str {
        &self.workflow_file_name
    }

    fn git_ref(&self) -> &str {
        &self.git_ref
    }

    fn check_interval(&self) -> u64 {
        self.check_interval
    }

    fn wait_timeout(&self) -> u64 {
        self.wait_timeout
    }

    fn client_payload(&self) -> &str {
        &self.client_payload
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("repo_owner", &self.repo_owner)?;
        validation::validate_non_empty_string("repo_name", &self.repo_name)?;
        validation::validate_non_empty_string("workflow_file_name", &self.workflow_file_name)?;
        validation::validate_non_empty_string("github_token", &self.github_token)?;
        validation::validate_non_empty_string("git_ref", &self.git_ref)?;
        validation::validate_positive_number("check_interval", self.check_interval, 1)?;
        validation::validate_positive_number("wait_timeout", self.wait_timeout, 1)?;
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_json_object("client_payload", &self.client_payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RelayError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn base_args() -> RelayArgs {
        RelayArgs {
            config: None,
            repo_owner: Some("octocat".to_string()),
            repo_name: Some("hello-world".to_string()),
            workflow_file_name: Some("ci.yml".to_string()),
            github_token: Some("ghp_test".to_string()),
            git_ref: None,
            check_interval: None,
            wait_timeout: None,
            client_payload: None,
            api_base_url: None,
            verbose: false,
        }
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let config = RelayConfig::resolve(base_args()).unwrap();

        assert_eq!(config.git_ref, "master");
        assert_eq!(config.check_interval, 5);
        assert_eq!(config.wait_timeout, 600);
        assert_eq!(config.client_payload, "{}");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_resolve_requires_owner() {
        let mut args = base_args();
        args.repo_owner = None;

        let result = RelayConfig::resolve(args);
        assert!(matches!(
            result,
            Err(RelayError::MissingConfigError { field }) if field == "repo_owner"
        ));
    }

    #[test]
    fn test_cli_wins_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "git_ref = \"main\"").unwrap();
        writeln!(file, "wait_timeout = 120").unwrap();
        writeln!(file, "repo_owner = \"someone-else\"").unwrap();

        let mut args = base_args();
        args.config = Some(file.path().to_path_buf());
        args.git_ref = Some("release".to_string());

        let config = RelayConfig::resolve(args).unwrap();

        // CLI 給的 ref 蓋過檔案，檔案補上 CLI 沒給的 timeout
        assert_eq!(config.git_ref, "release");
        assert_eq!(config.wait_timeout, 120);
        assert_eq!(config.repo_owner, "octocat");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RelayConfig::resolve(base_args()).unwrap();
        assert!(config.validate().is_ok());

        config.check_interval = 0;
        assert!(config.validate().is_err());

        config.check_interval = 5;
        config.client_payload = "[1, 2]".to_string();
        assert!(config.validate().is_err());

        config.client_payload = "{}".to_string();
        config.api_base_url = "ftp://api.github.com".to_string();
        assert!(config.validate().is_err());
    }
}
