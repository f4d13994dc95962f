//! 习惯追踪客户端核心
//!
//! 与平台无关：浏览器能力（fetch、localStorage）通过 [`request::HttpClient`]
//! 和 [`storage::KeyValueStore`] 注入，所有状态变化都可以在原生测试中驱动。

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod focus;
pub mod habits;
pub mod preferences;
pub mod request;
pub mod route;
pub mod session;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod token;

pub use api::{AuthApi, HabitApi};
pub use auth::{AuthAction, AuthMode, AuthState, AuthStatus, Session};
pub use config::ClientConfig;
pub use error::{HabitError, HabitErrorStatus, HabitResult};
pub use focus::FocusState;
pub use habits::{HabitCommand, HabitDraft, HabitEvent, HabitList, HabitService, HabitStore};
pub use preferences::{Preferences, Theme};
pub use route::{AppRoute, GuardDecision, Section, guard};
pub use session::SessionManager;
pub use stats::{HabitSummary, StreakPoint};
pub use storage::{KeyValueStore, MemoryStorage};
