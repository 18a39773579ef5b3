//! 管理控制台入口：加载配置、恢复会话、装配协作方句柄。

mod ops;
mod state;

use console_backend::{InMemoryBackend, RecordingAuditSink, SnapshotApi};
use console_config::AppConfig;
use console_session::{FileSessionStore, SessionManager, SessionState};
use console_telemetry::init_tracing;
use state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // 内存协作方（含演示行业）；HTTP 实现可在此处替换装配
    let backend = Arc::new(InMemoryBackend::with_demo_industry());
    let audit = Arc::new(RecordingAuditSink::new());
    let state = AppState::new(backend, audit, &config);

    // 载入时一次性恢复会话
    let session_store = FileSessionStore::open(&config.session_file);
    let sessions = SessionManager::new(config.admin_industry_id.clone());
    match sessions.restore(&session_store) {
        SessionState::Authenticated(ctx) => {
            tracing::info!(username = %ctx.username, tier = ?ctx.tier(), "session restored");
            let snapshot = state
                .snapshot_api
                .fetch_industry_snapshot(&ctx, "industry-1")
                .await?;
            tracing::info!(
                industry = %snapshot.industry.industry_name,
                units = snapshot.units.len(),
                categories = snapshot.categories.len(),
                "industry snapshot loaded"
            );
        }
        SessionState::Anonymous => {
            tracing::info!(
                login = console_session::LOGIN_ROUTE,
                "no valid session, login required"
            );
        }
    }
    Ok(())
}
