//! 界面偏好：主题持久化，通知开关只在本次会话内有效

use crate::storage::KeyValueStore;
use habit_shared::STORAGE_THEME_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 未知值回退为浅色
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
        }
    }
}

impl Preferences {
    pub fn load(storage: &impl KeyValueStore) -> Self {
        let theme = storage
            .get(STORAGE_THEME_KEY)
            .map(|v| Theme::parse(&v))
            .unwrap_or_default();
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn set_theme(&mut self, theme: Theme, storage: &impl KeyValueStore) {
        self.theme = theme;
        if !storage.set(STORAGE_THEME_KEY, theme.as_str()) {
            log::warn!("failed to persist theme '{}'", theme.as_str());
        }
    }

    pub fn toggle_theme(&mut self, storage: &impl KeyValueStore) -> Theme {
        self.set_theme(self.theme.toggled(), storage);
        self.theme
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications = !self.notifications;
        self.notifications
    }
}
