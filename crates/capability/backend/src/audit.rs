//! 审计旁路：成功写之后的尽力记录。

use crate::traits::AuditSink;
use std::time::{SystemTime, UNIX_EPOCH};

/// 审计条目：操作者、端点与请求负载。
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub username: String,
    pub endpoint: String,
    pub payload: serde_json::Value,
    pub request_id: String,
    pub ts_ms: i64,
}

impl AuditEntry {
    /// 以当前时间与新 request_id 构造条目。
    pub fn new(
        username: impl Into<String>,
        endpoint: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            username: username.into(),
            endpoint: endpoint.into(),
            payload,
            request_id: console_telemetry::new_request_ids().request_id,
            ts_ms: now_epoch_ms(),
        }
    }
}

/// 尽力记录审计条目：失败只记警告与计数，不上抛、不重试。
pub async fn record_best_effort(sink: &dyn AuditSink, entry: AuditEntry) {
    let endpoint = entry.endpoint.clone();
    if let Err(err) = sink.record(entry).await {
        console_telemetry::record_audit_dropped();
        tracing::warn!(endpoint = %endpoint, error = %err, "audit side-channel dropped");
    }
}

/// 当前时间戳（毫秒）。
fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
