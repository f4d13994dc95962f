//! 路由服务模块
//!
//! 封装 web_sys 的 History API：所有对 window.history 的操作都集中在此模块。
//! 守卫判断由核心库的 [`guard`] 完成，这里只负责把结果落到 URL 和信号上。

use habit_tracker::auth::AuthStatus;
use habit_tracker::route::{AppRoute, GuardDecision, guard};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向，不产生新的历史记录）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 当前路由保存在信号中；认证状态通过注入的信号读取，与认证模块解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    auth_status: Signal<AuthStatus>,
}

impl RouterService {
    fn new(auth_status: Signal<AuthStatus>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            auth_status,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前路由经过守卫后的结果
    pub fn decision(&self) -> GuardDecision {
        guard(self.current_route.get(), self.auth_status.get())
    }

    pub fn navigate(&self, path: &str) {
        let target = AppRoute::from_path(path);
        if target == self.current_route.get_untracked() {
            return;
        }
        push_history_state(path);
        self.set_route.set(target);
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate(route.to_path());
    }

    /// 浏览器后退 / 前进
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 路由或认证状态变化时执行守卫，必要时重定向
    ///
    /// 覆盖初次加载、导航、popstate、登录后与登出后四种情况。
    fn setup_guard(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth_status = self.auth_status;

        Effect::new(move |_| {
            let route = current_route.get();
            let status = auth_status.get();
            if let GuardDecision::Redirect(target) = guard(route, status) {
                log::info!("[Router] {:?} at {}, redirecting to {}", status, route, target);
                replace_history_state(target.to_path());
                set_route.set(target);
            }
        });
    }
}

fn provide_router(auth_status: Signal<AuthStatus>) -> RouterService {
    let router = RouterService::new(auth_status);

    router.init_popstate_listener();
    router.setup_guard();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    auth_status: Signal<AuthStatus>,
    children: Children,
) -> impl IntoView {
    provide_router(auth_status);

    children()
}

/// 路由出口组件
///
/// 会话恢复完成前以及重定向过程中渲染加载状态，避免闪现受保护内容。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    // 只有守卫结果变化时才重新渲染页面
    let decision = Memo::new(move |_| router.decision());

    move || match decision.get() {
        GuardDecision::Render(route) => matcher(route),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(into, optional)] class: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(route);
    };

    view! {
        <a href=route.to_path() class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
