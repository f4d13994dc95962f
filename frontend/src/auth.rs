//! 认证模块
//!
//! 管理应用级认证状态，与路由系统解耦：路由服务只读取注入的状态信号。
//! 持久化的 token 只经由 [`SessionManager`] 读写。

use crate::config;
use crate::web::{FetchClient, LocalStorage};
use habit_shared::Timestamp;
use habit_tracker::api::AuthApi;
use habit_tracker::auth::{AuthAction, AuthMode, AuthState, AuthStatus, credentials};
use habit_tracker::session::SessionManager;
use leptos::prelude::*;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn status_signal(&self) -> Signal<AuthStatus> {
        let state = self.state;
        Memo::new(move |_| state.with(AuthState::status)).into()
    }

    /// 当前 token 的派生信号
    pub fn token_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.session.token().map(str::to_string))).into()
    }

    fn dispatch(&self, action: AuthAction) {
        self.set_state.update(|state| {
            let session = std::mem::take(&mut state.session);
            state.session = manager().dispatch(session, action);
        });
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

fn manager() -> SessionManager<LocalStorage> {
    SessionManager::new(LocalStorage)
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动时从 LocalStorage 恢复会话
pub fn init_auth(ctx: &AuthContext) {
    let session = manager().restore(Timestamp::now());
    ctx.set_state.set(AuthState {
        session,
        restored: true,
    });
}

/// 登录或注册
///
/// 成功后路由服务会监听到认证状态变化并自动跳转到控制面板。
/// 失败时错误写入会话状态，同时作为返回值给表单展示。
pub async fn submit(
    ctx: AuthContext,
    mode: AuthMode,
    username: String,
    password: String,
    email: String,
) -> Result<(), String> {
    let creds = credentials(mode, &username, &password, &email).map_err(|e| e.message().to_string())?;

    let api = AuthApi::new(FetchClient, config());
    let result = match mode {
        AuthMode::Login => api.login(&creds).await,
        AuthMode::Register => api.register(&creds).await,
    };

    match result {
        Ok(payload) => {
            log::info!("signed in as {}", payload.user.display_name());
            ctx.dispatch(AuthAction::LoginSuccess {
                user: payload.user,
                token: payload.token,
            });
            match ctx.state.get_untracked().session.error() {
                Some(message) => Err(message.to_string()),
                None => Ok(()),
            }
        }
        Err(e) => {
            log::warn!("{}", e);
            let message = e.message().to_string();
            ctx.dispatch(AuthAction::LoginFailure(message.clone()));
            Err(message)
        }
    }
}

/// 注销：清除 token，路由服务会自动重定向到登录页
pub fn logout(ctx: &AuthContext) {
    ctx.dispatch(AuthAction::Logout);
}
