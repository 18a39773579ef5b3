//! 用户权限写接口的内存实现。

use super::{InMemoryBackend, ensure_viewer, lock_failed};
use crate::error::BackendError;
use crate::models::UserAccount;
use crate::traits::UserApi;
use domain::ViewerContext;

#[async_trait::async_trait]
impl UserApi for InMemoryBackend {
    /// 全量替换用户权限集合。
    async fn replace_permissions(
        &self,
        ctx: &ViewerContext,
        user_id: &str,
        permissions: Vec<String>,
    ) -> Result<UserAccount, BackendError> {
        ensure_viewer(ctx)?;
        let mut users = self.users.write().map_err(|_| lock_failed())?;
        for list in users.values_mut() {
            if let Some(user) = list.iter_mut().find(|item| item.user_id == user_id) {
                user.permissions = permissions;
                return Ok(user.clone());
            }
        }
        Err(BackendError::not_found("user"))
    }
}
