use crate::auth::{logout, use_auth};
use crate::components::habit_management::HabitManagement;
use crate::components::overview::Overview;
use crate::components::settings::SettingsPanel;
use crate::habits::provide_habits;
use crate::web::router::Link;
use habit_tracker::focus::FocusState;
use habit_tracker::route::Section;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 控制面板外壳：侧边栏 + 顶栏 + 当前分区
#[component]
pub fn DashboardPage(section: Section) -> impl IntoView {
    let auth = use_auth();
    let habits = provide_habits();
    let focus = RwSignal::new(FocusState::default());

    // 初始加载
    spawn_local(habits.refresh());

    // 点击菜单以外的区域时关闭所有弹出菜单
    let handle = window_event_listener(leptos::ev::click, move |_| {
        if focus.with_untracked(FocusState::any_open) {
            focus.update(FocusState::dismiss);
        }
    });
    on_cleanup(move || handle.remove());

    let display_name = move || auth.state.with(|s| s.session.display_name().to_string());

    let on_logout = move |_| {
        focus.update(FocusState::dismiss);
        logout(&auth);
    };

    let nav_class = move |s: Section| {
        if s == section {
            "active font-semibold".to_string()
        } else {
            String::new()
        }
    };

    let nav_items = move || {
        Section::all()
            .into_iter()
            .map(|s| {
                view! {
                    <li>
                        <Link route=s.route() class=nav_class(s)>{s.label()}</Link>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans md:flex">
            <aside class="hidden md:block w-64 bg-base-100 shadow-xl min-h-screen">
                <div class="p-6 text-xl font-bold">"Habit Tracker"</div>
                <ul class="menu p-4 gap-1">{nav_items}</ul>
            </aside>

            <div class="flex-1 p-4 md:p-8 space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-none md:hidden">
                        <button
                            class="btn btn-ghost btn-square"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                focus.update(FocusState::toggle_mobile_menu);
                            }
                        >
                            <svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" class="inline-block w-5 h-5 stroke-current"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"></path></svg>
                        </button>
                    </div>
                    <div class="flex-1">
                        <span class="text-xl font-semibold px-2">{section.label()}</span>
                    </div>
                    <div class="flex-none relative">
                        <button
                            class="btn btn-ghost gap-2"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                focus.update(FocusState::toggle_dropdown);
                            }
                        >
                            <div class="avatar placeholder">
                                <div class="bg-neutral text-neutral-content rounded-full w-8">
                                    <span>{move || display_name().chars().next().unwrap_or('?').to_string()}</span>
                                </div>
                            </div>
                            {display_name}
                        </button>
                        <Show when=move || focus.with(|f| f.dropdown_open)>
                            <ul
                                class="menu absolute right-0 mt-2 z-[1] p-2 shadow bg-base-100 rounded-box w-52"
                                on:click=|ev| ev.stop_propagation()
                            >
                                <li><Link route=Section::Settings.route()>"Settings"</Link></li>
                                <li>
                                    <a on:click=on_logout class="text-error hover:bg-error/10">"Log out"</a>
                                </li>
                            </ul>
                        </Show>
                    </div>
                </div>

                <Show when=move || focus.with(|f| f.mobile_menu_open)>
                    <ul class="menu md:hidden bg-base-100 rounded-box shadow-xl p-2">{nav_items}</ul>
                </Show>

                <Show when=move || habits.error.get().is_some()>
                    <div role="alert" class="alert alert-error shadow-lg">
                        <span>{move || habits.error.get().unwrap_or_default()}</span>
                        <button class="btn btn-sm btn-ghost" on:click=move |_| habits.error.set(None)>"Dismiss"</button>
                    </div>
                </Show>

                {match section {
                    Section::Overview => view! { <Overview /> }.into_any(),
                    Section::ManageHabits => view! { <HabitManagement /> }.into_any(),
                    Section::Settings => view! { <SettingsPanel /> }.into_any(),
                }}
            </div>
        </div>
    }
}
