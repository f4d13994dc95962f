//! 主题与通知偏好

use crate::web::LocalStorage;
use habit_tracker::preferences::{Preferences, Theme};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PreferencesContext(pub RwSignal<Preferences>);

impl PreferencesContext {
    pub fn theme(&self) -> Theme {
        self.0.with(|p| p.theme)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.0.update(|p| p.set_theme(theme, &LocalStorage));
        apply_theme(theme);
    }

    pub fn toggle_theme(&self) {
        let theme = self.0.with_untracked(|p| p.theme.toggled());
        self.set_theme(theme);
    }

    pub fn toggle_notifications(&self) {
        self.0.update(|p| {
            p.toggle_notifications();
        });
    }
}

/// 把主题写到 `<body>` 的 class 与 `data-theme` 上
fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let classes = body.class_list();
    let _ = classes.remove_2(Theme::Light.as_str(), Theme::Dark.as_str());
    let _ = classes.add_1(theme.as_str());
    let _ = body.set_attribute("data-theme", theme.as_str());
}

pub fn provide_preferences() -> PreferencesContext {
    let prefs = Preferences::load(&LocalStorage);
    apply_theme(prefs.theme);
    let ctx = PreferencesContext(RwSignal::new(prefs));
    provide_context(ctx);
    ctx
}

pub fn use_preferences() -> PreferencesContext {
    use_context::<PreferencesContext>().expect("PreferencesContext should be provided")
}
