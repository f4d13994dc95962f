//! Habit Tracker 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `auth`: 认证状态（会话恢复、登录、注销）
//! - `habits`: 习惯列表信号与网络操作
//! - `preferences`: 主题与通知偏好
//! - `web`: 浏览器 API 封装与路由服务
//! - `components`: UI 组件层

mod auth;
mod habits;
mod preferences;

mod components {
    pub mod dashboard;
    pub mod habit_management;
    pub mod login;
    pub mod overview;
    pub mod settings;
}

pub mod web;

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::preferences::provide_preferences;
use habit_tracker::config::ClientConfig;
use habit_tracker::route::AppRoute;
use leptos::prelude::*;
use std::rc::Rc;
use web::router::{Link, Router, RouterOutlet};

thread_local! {
    static CONFIG: Rc<ClientConfig> = Rc::new(ClientConfig::from_build_env());
}

/// 构建期注入的接口配置
pub(crate) fn config() -> Rc<ClientConfig> {
    CONFIG.with(Rc::clone)
}

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link route=AppRoute::Login class="btn btn-primary mt-6">"Back to start"</Link>
                </div>
            </div>
        }
        .into_any(),
        guarded => match guarded.section() {
            Some(section) => view! { <DashboardPage section=section /> }.into_any(),
            None => ().into_any(),
        },
    }
}

#[component]
pub fn App() -> impl IntoView {
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    provide_preferences();

    // 同步读取 LocalStorage，首帧之后状态即离开 Pending
    init_auth(&auth_ctx);
    log::debug!("api base: {}", config().api_base_url);

    let auth_status = auth_ctx.status_signal();

    view! {
        <Router auth_status=auth_status>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
