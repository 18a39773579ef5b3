//! 会话生命周期：恢复、建立与登出。
//!
//! 状态只有两个：ANONYMOUS 与 AUTHENTICATED。进入已认证态需要
//! 两个条件同时成立：token 未过期（载入时一次性判定，无后台
//! 刷新），且主体的 industryId 等于管理租户哨兵值——租户范围
//! 校验，token 结构有效也不豁免。任一不满足即清空全部会话材料。

mod store;
mod token;

pub use store::{FileSessionStore, InMemorySessionStore, SessionStore, keys};
pub use token::ensure_not_expired;

use domain::ViewerContext;

/// 登录入口路由：登出后强制整页跳转到这里（非应用内软路由）。
pub const LOGIN_ROUTE: &str = "/login";

/// 会话相关错误。
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("principal does not belong to the admin tenant")]
    TenantMismatch,
    #[error("credentials must be non-empty and contain no whitespace")]
    InvalidCredentialFormat,
}

/// 会话状态。
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticated(ViewerContext),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// 登录成功后由外部认证端点返回的主体。
#[derive(Debug, Clone)]
pub struct SessionPrincipal {
    pub username: String,
    pub industry_id: String,
    pub permissions: Vec<String>,
    pub access_token: String,
}

/// 会话管理器：持有管理租户哨兵值。
pub struct SessionManager {
    admin_industry_id: String,
}

impl SessionManager {
    /// 以管理租户哨兵值构造。
    pub fn new(admin_industry_id: impl Into<String>) -> Self {
        Self {
            admin_industry_id: admin_industry_id.into(),
        }
    }

    /// 从会话存储恢复状态（载入时调用一次）。
    ///
    /// 缺失任一键、token 过期/不可解码、或租户哨兵不匹配，
    /// 都同步清空全部会话材料并回到 ANONYMOUS。
    pub fn restore(&self, store: &dyn SessionStore) -> SessionState {
        let Some(username) = store.get(keys::USERNAME) else {
            clear_session(store);
            return SessionState::Anonymous;
        };
        let Some(industry_id) = store.get(keys::INDUSTRY_ID) else {
            clear_session(store);
            return SessionState::Anonymous;
        };
        let Some(access_token) = store.get(keys::ACCESS_TOKEN) else {
            clear_session(store);
            return SessionState::Anonymous;
        };
        let permissions = store
            .get(keys::PERMISSIONS)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();

        if let Err(err) = ensure_not_expired(&access_token) {
            tracing::info!(error = %err, "stored session token rejected");
            clear_session(store);
            return SessionState::Anonymous;
        }
        if industry_id != self.admin_industry_id {
            tracing::warn!(industry_id = %industry_id, "principal outside admin tenant");
            clear_session(store);
            return SessionState::Anonymous;
        }
        SessionState::Authenticated(ViewerContext::new(username, industry_id, permissions))
    }

    /// 登录成功后建立会话。
    ///
    /// 校验失败时不写入任何键，返回错误由界面提示。
    pub fn establish(
        &self,
        store: &dyn SessionStore,
        principal: SessionPrincipal,
    ) -> Result<ViewerContext, SessionError> {
        ensure_not_expired(&principal.access_token)?;
        if principal.industry_id != self.admin_industry_id {
            return Err(SessionError::TenantMismatch);
        }
        store.put(keys::USERNAME, &principal.username);
        store.put(keys::INDUSTRY_ID, &principal.industry_id);
        store.put(
            keys::PERMISSIONS,
            &serde_json::to_string(&principal.permissions).unwrap_or_else(|_| "[]".to_string()),
        );
        store.put(keys::ACCESS_TOKEN, &principal.access_token);
        Ok(ViewerContext::new(
            principal.username,
            principal.industry_id,
            principal.permissions,
        ))
    }

    /// 硬登出：同步清空全部会话材料，返回整页跳转目标。
    pub fn logout(&self, store: &dyn SessionStore) -> &'static str {
        clear_session(store);
        LOGIN_ROUTE
    }
}

/// 同步清空全部会话键。
pub fn clear_session(store: &dyn SessionStore) {
    for key in keys::ALL {
        store.remove(key);
    }
}

/// 登录前的凭据格式校验：含空白字符的用户名/口令不发往协作方。
pub fn validate_credentials(username: &str, password: &str) -> Result<(), SessionError> {
    let well_formed = |value: &str| !value.is_empty() && !value.chars().any(char::is_whitespace);
    if !well_formed(username) || !well_formed(password) {
        return Err(SessionError::InvalidCredentialFormat);
    }
    Ok(())
}
