//! 原生 Web API 封装模块
//!
//! 对浏览器原生 API 的轻量级封装，以减小 WASM 二进制体积。

mod http;
mod logger;
pub mod router;
mod storage;
mod timer;

pub use http::FetchClient;
pub use logger::init_logger;
pub use storage::LocalStorage;
pub use timer::Interval;

/// 阻塞式提示框，用于本地校验失败
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
