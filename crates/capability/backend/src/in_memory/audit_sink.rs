//! 审计旁路的测试用实现。

use crate::audit::AuditEntry;
use crate::error::BackendError;
use crate::traits::AuditSink;
use std::sync::Mutex;

/// 记录型审计汇：收集条目供断言。
pub struct RecordingAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// 取走已记录的条目。
    pub fn take(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|mut entries| std::mem::take(&mut *entries))
            .unwrap_or_default()
    }
}

impl Default for RecordingAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), BackendError> {
        self.entries
            .lock()
            .map_err(|_| BackendError::Connection("audit sink unavailable".to_string()))?
            .push(entry);
        Ok(())
    }
}

/// 恒失败的审计汇：验证旁路失败被吞掉。
#[derive(Default)]
pub struct FailingAuditSink;

#[async_trait::async_trait]
impl AuditSink for FailingAuditSink {
    async fn record(&self, _entry: AuditEntry) -> Result<(), BackendError> {
        Err(BackendError::Connection("audit endpoint unreachable".to_string()))
    }
}
