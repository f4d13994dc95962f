use crate::preferences::use_preferences;
use habit_tracker::preferences::Theme;
use leptos::prelude::*;

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let prefs = use_preferences();

    let on_theme_change = move |ev: leptos::ev::Event| {
        prefs.set_theme(Theme::parse(&event_target_value(&ev)));
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body gap-6">
                <h3 class="card-title">"Settings"</h3>

                <div class="form-control">
                    <label class="label cursor-pointer justify-start gap-4">
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            prop:checked=move || prefs.0.with(|p| p.notifications)
                            on:change=move |_| prefs.toggle_notifications()
                        />
                        <span class="label-text">"Enable notifications"</span>
                    </label>
                </div>

                <label class="form-control w-full max-w-xs">
                    <span class="label-text mb-2">"Theme"</span>
                    <select class="select select-bordered" on:change=on_theme_change>
                        <option value="light" selected=move || prefs.theme() == Theme::Light>"Light"</option>
                        <option value="dark" selected=move || prefs.theme() == Theme::Dark>"Dark"</option>
                    </select>
                </label>

                <div>
                    <button class="btn btn-outline" on:click=move |_| prefs.toggle_theme()>
                        {move || match prefs.theme() {
                            Theme::Light => "Switch to dark",
                            Theme::Dark => "Switch to light",
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}
