//! 认证状态
//!
//! `Session` 是纯数据，只能通过 [`reduce`] 的三种动作改变。
//! 是否已认证由 token 是否存在推导，不单独存储。

use crate::error::{HabitError, HabitResult};
use habit_shared::{Credentials, DEFAULT_ERROR_MESSAGE, User};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern should compile"));

// =========================================================
// Session
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    error: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("Guest", User::display_name)
    }
}

/// 认证动作
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginSuccess { user: User, token: String },
    LoginFailure(String),
    Logout,
}

/// 认证 reducer
///
/// - `LoginSuccess`: 进入已认证状态并清除错误；空 token 按失败处理
/// - `LoginFailure`: 只记录错误，认证状态保持不变
/// - `Logout`: 回到匿名状态
pub fn reduce(session: Session, action: AuthAction) -> Session {
    match action {
        AuthAction::LoginSuccess { user, token } => {
            if token.trim().is_empty() {
                return Session {
                    error: Some(DEFAULT_ERROR_MESSAGE.to_string()),
                    ..session
                };
            }
            Session {
                token: Some(token),
                user: Some(user),
                error: None,
            }
        }
        AuthAction::LoginFailure(message) => Session {
            error: Some(message),
            ..session
        },
        AuthAction::Logout => Session::anonymous(),
    }
}

// =========================================================
// 启动阶段
// =========================================================

/// 路由守卫看到的认证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// 会话恢复尚未完成，不能渲染受保护内容
    Pending,
    Anonymous,
    Authenticated,
}

/// 应用级认证状态：会话 + 恢复是否完成
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub session: Session,
    pub restored: bool,
}

impl AuthState {
    pub fn status(&self) -> AuthStatus {
        if !self.restored {
            AuthStatus::Pending
        } else if self.session.is_authenticated() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Anonymous
        }
    }
}

// =========================================================
// 登录 / 注册表单
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// 校验表单并生成请求体；登录模式下不发送 email
pub fn credentials(
    mode: AuthMode,
    username: &str,
    password: &str,
    email: &str,
) -> HabitResult<Credentials> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(HabitError::validation("Please fill in all fields."));
    }

    let email = match mode {
        AuthMode::Login => None,
        AuthMode::Register => {
            let email = email.trim();
            if !is_valid_email(email) {
                return Err(HabitError::validation("Please enter a valid email address."));
            }
            Some(email.to_string())
        }
    };

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
        email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            username: Some(name.to_string()),
            ..User::default()
        }
    }

    fn logged_in() -> Session {
        reduce(
            Session::anonymous(),
            AuthAction::LoginSuccess {
                user: user("ana"),
                token: "t1".into(),
            },
        )
    }

    #[test]
    fn test_login_success_authenticates_and_clears_error() {
        let failed = reduce(Session::anonymous(), AuthAction::LoginFailure("bad".into()));
        assert_eq!(failed.error(), Some("bad"));

        let session = reduce(
            failed,
            AuthAction::LoginSuccess {
                user: user("ana"),
                token: "t1".into(),
            },
        );
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("t1"));
        assert_eq!(session.display_name(), "ana");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_login_failure_keeps_authentication() {
        let session = reduce(logged_in(), AuthAction::LoginFailure("oops".into()));
        assert!(session.is_authenticated());
        assert_eq!(session.error(), Some("oops"));

        let anon = reduce(Session::anonymous(), AuthAction::LoginFailure("oops".into()));
        assert!(!anon.is_authenticated());
    }

    #[test]
    fn test_logout_resets_everything() {
        let session = reduce(logged_in(), AuthAction::Logout);
        assert_eq!(session, Session::anonymous());
        assert_eq!(session.display_name(), "Guest");
    }

    #[test]
    fn test_blank_token_never_authenticates() {
        let session = reduce(
            Session::anonymous(),
            AuthAction::LoginSuccess {
                user: user("ana"),
                token: "  ".into(),
            },
        );
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert_eq!(session.error(), Some(DEFAULT_ERROR_MESSAGE));
    }

    #[test]
    fn test_status_is_pending_until_restored() {
        let mut state = AuthState::default();
        assert_eq!(state.status(), AuthStatus::Pending);
        state.restored = true;
        assert_eq!(state.status(), AuthStatus::Anonymous);
        state.session = logged_in();
        assert_eq!(state.status(), AuthStatus::Authenticated);
    }

    #[test]
    fn test_credentials_validation() {
        let err = credentials(AuthMode::Login, " ", "pw", "").unwrap_err();
        assert!(err.is_validation());

        let creds = credentials(AuthMode::Login, " ana ", "pw", "ignored").unwrap();
        assert_eq!(creds.username, "ana");
        assert!(creds.email.is_none());

        let err = credentials(AuthMode::Register, "ana", "pw", "not-an-email").unwrap_err();
        assert_eq!(err.message(), "Please enter a valid email address.");

        let creds = credentials(AuthMode::Register, "ana", "pw", "ana@example.com").unwrap();
        assert_eq!(creds.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c d"));
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Register);
    }
}
