use clap::Parser;
use workflow_relay::utils::{logger, validation::Validate};
use workflow_relay::{GithubClient, RelayArgs, RelayConfig, RelayEngine, RunConclusion};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = RelayArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting workflow-relay CLI");

    // 合併配置來源並驗證
    let config = match RelayConfig::resolve(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration resolution failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 建立 API client 與 relay 引擎
    let client = GithubClient::new(
        &config.api_base_url,
        &config.repo_owner,
        &config.repo_name,
        &config.github_token,
    );
    let engine = RelayEngine::new(client, config);

    match engine.run().await {
        Ok(run) => {
            if run.succeeded() {
                tracing::info!("✅ External workflow completed successfully!");
                println!("✅ External workflow completed successfully!");
            } else {
                let conclusion = run
                    .conclusion
                    .unwrap_or(RunConclusion::Other);
                tracing::error!("❌ External workflow failed with conclusion: {}", conclusion);
                eprintln!("❌ External workflow failed ({})", conclusion);
                std::process::exit(1);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Relay failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                workflow_relay::utils::error::ErrorSeverity::Low => 0,
                workflow_relay::utils::error::ErrorSeverity::Medium => 2,
                workflow_relay::utils::error::ErrorSeverity::High => 1,
                workflow_relay::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
