//! 会话存储：固定键名的键值存储（cookie/local store 的抽象）。

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// 固定的会话键名。
pub mod keys {
    pub const USERNAME: &str = "username";
    pub const INDUSTRY_ID: &str = "industryId";
    pub const PERMISSIONS: &str = "permissions";
    pub const ACCESS_TOKEN: &str = "accessToken";

    pub const ALL: [&str; 4] = [USERNAME, INDUSTRY_ID, PERMISSIONS, ACCESS_TOKEN];
}

/// 会话键值存储接口。
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 内存会话存储（测试用）。
pub struct InMemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// 是否不含任何会话材料。
    pub fn is_empty(&self) -> bool {
        self.values.read().map(|map| map.is_empty()).unwrap_or(true)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.values.write() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.values.write() {
            map.remove(key);
        }
    }
}

/// 文件会话存储：整表 JSON 落盘，模拟浏览器持久化。
///
/// 落盘失败只记警告；会话材料丢失的代价是重新登录，不致命。
pub struct FileSessionStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    /// 打开（或新建）会话文件。
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok())
            .unwrap_or_default();
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn persist(&self, map: &HashMap<String, String>) {
        match serde_json::to_string_pretty(map) {
            Ok(raw) => {
                if let Err(err) = std::fs::write(&self.path, raw) {
                    tracing::warn!(path = %self.path.display(), error = %err, "session file write failed");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "session serialization failed");
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.values.write() {
            map.insert(key.to_string(), value.to_string());
            self.persist(&map);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.values.write() {
            if map.remove(key).is_some() {
                self.persist(&map);
            }
        }
    }
}
