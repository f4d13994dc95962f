//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 [`KeyValueStore`]。

use habit_tracker::storage::KeyValueStore;

/// 浏览器 LocalStorage
///
/// 不可用时（如隐私模式）读取返回 `None`，写入返回 `false`。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
