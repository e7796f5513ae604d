use crate::utils::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML 配置檔，欄位與 CLI 參數一一對應，CLI 優先
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub workflow_file_name: Option<String>,
    pub github_token: Option<String>,
    pub git_ref: Option<String>,
    pub check_interval: Option<u64>,
    pub wait_timeout: Option<u64>,
    pub client_payload: Option<String>,
    pub api_base_url: Option<String>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| RelayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_TOKEN})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_file_config() {
        let toml_content = r#"
repo_owner = "octocat"
repo_name = "hello-world"
workflow_file_name = "ci.yml"
git_ref = "main"
check_interval = 10
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.repo_owner.as_deref(), Some("octocat"));
        assert_eq!(config.git_ref.as_deref(), Some("main"));
        assert_eq!(config.check_interval, Some(10));
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RELAY_TEST_TOKEN", "ghp_from_env");

        let toml_content = r#"
github_token = "${RELAY_TEST_TOKEN}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.github_token.as_deref(), Some("ghp_from_env"));
    }

    #[test]
    fn test_unknown_env_var_is_left_as_is() {
        let toml_content = r#"
github_token = "${RELAY_TEST_UNSET_VAR}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.github_token.as_deref(),
            Some("${RELAY_TEST_UNSET_VAR}")
        );
    }

    #[test]
    fn test_from_file_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "repo_owner = \"octocat\"").unwrap();
        writeln!(file, "wait_timeout = 120").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.repo_owner.as_deref(), Some("octocat"));
        assert_eq!(config.wait_timeout, Some(120));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = FileConfig::from_toml_str("repo_owner = ");
        assert!(matches!(result, Err(RelayError::ConfigError { .. })));
    }
}
