//! 路由定义与守卫
//!
//! 纯逻辑层，不依赖 DOM。前端路由服务在每次导航（包括 popstate 和
//! 认证状态变化）时调用 [`guard`] 决定渲染或重定向。

use crate::auth::AuthStatus;
use std::fmt::Display;

/// 应用路由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录 / 注册页（入口）
    #[default]
    Login,
    Dashboard,
    ManageHabits,
    Settings,
    NotFound,
}

/// 控制面板内的分区，三个受保护路由共用同一外壳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    ManageHabits,
    Settings,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        // 忽略查询串与末尾斜杠
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/manageHabits" => Self::ManageHabits,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::ManageHabits => "/manageHabits",
            Self::Settings => "/settings",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        self.section().is_some()
    }

    /// 已认证用户访问入口页时应离开
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Dashboard => Some(Section::Overview),
            Self::ManageHabits => Some(Section::ManageHabits),
            Self::Settings => Some(Section::Settings),
            Self::Login | Self::NotFound => None,
        }
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Section {
    pub fn route(&self) -> AppRoute {
        match self {
            Section::Overview => AppRoute::Dashboard,
            Section::ManageHabits => AppRoute::ManageHabits,
            Section::Settings => AppRoute::Settings,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Overview => "Dashboard",
            Section::ManageHabits => "Manage Habits",
            Section::Settings => "Settings",
        }
    }

    pub fn all() -> [Section; 3] {
        [Section::Overview, Section::ManageHabits, Section::Settings]
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话恢复未完成，渲染中性的加载状态
    Pending,
    Render(AppRoute),
    Redirect(AppRoute),
}

/// 根据认证状态决定目标路由的去向
pub fn guard(target: AppRoute, status: AuthStatus) -> GuardDecision {
    match status {
        AuthStatus::Pending if target.requires_auth() || target.should_redirect_when_authenticated() => {
            GuardDecision::Pending
        }
        AuthStatus::Pending => GuardDecision::Render(target),
        AuthStatus::Anonymous if target.requires_auth() => {
            GuardDecision::Redirect(AppRoute::auth_failure_redirect())
        }
        AuthStatus::Authenticated if target.should_redirect_when_authenticated() => {
            GuardDecision::Redirect(AppRoute::auth_success_redirect())
        }
        _ => GuardDecision::Render(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::ManageHabits,
            AppRoute::Settings,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/settings/"), AppRoute::Settings);
        assert_eq!(AppRoute::from_path("/dashboard?tab=1"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/managehabits"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_anonymous_is_redirected_from_guarded_routes() {
        for route in [AppRoute::Dashboard, AppRoute::ManageHabits, AppRoute::Settings] {
            assert_eq!(
                guard(route, AuthStatus::Anonymous),
                GuardDecision::Redirect(AppRoute::Login)
            );
            assert_eq!(guard(route, AuthStatus::Authenticated), GuardDecision::Render(route));
        }
        assert_eq!(
            guard(AppRoute::Login, AuthStatus::Anonymous),
            GuardDecision::Render(AppRoute::Login)
        );
    }

    #[test]
    fn test_authenticated_leaves_entry_page() {
        assert_eq!(
            guard(AppRoute::Login, AuthStatus::Authenticated),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn test_not_found_is_unguarded() {
        for status in [AuthStatus::Pending, AuthStatus::Anonymous, AuthStatus::Authenticated] {
            assert_eq!(
                guard(AppRoute::NotFound, status),
                GuardDecision::Render(AppRoute::NotFound)
            );
        }
    }

    #[test]
    fn test_pending_waits_for_restoration() {
        assert_eq!(guard(AppRoute::Dashboard, AuthStatus::Pending), GuardDecision::Pending);
        assert_eq!(guard(AppRoute::Login, AuthStatus::Pending), GuardDecision::Pending);
    }

    #[test]
    fn test_sections_share_shell() {
        assert_eq!(AppRoute::ManageHabits.section(), Some(Section::ManageHabits));
        assert_eq!(AppRoute::Login.section(), None);
        for section in Section::all() {
            assert_eq!(section.route().section(), Some(section));
        }
    }
}
