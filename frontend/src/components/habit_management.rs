use crate::habits::use_habits;
use crate::web::Interval;
use habit_shared::{DaySet, Habit, Id, Timestamp, Weekday};
use habit_tracker::streak;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 冷却剩余时间的刷新间隔
const TICK_MILLIS: u32 = 60_000;

/// 表单状态：新建或编辑共用
#[derive(Clone, Copy)]
struct HabitForm {
    editing: RwSignal<Option<Id>>,
    title: RwSignal<String>,
    days: RwSignal<DaySet>,
    duration: RwSignal<u32>,
}

impl HabitForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            days: RwSignal::new(DaySet::new()),
            duration: RwSignal::new(1),
        }
    }

    fn reset(&self) {
        self.editing.set(None);
        self.title.set(String::new());
        self.days.set(DaySet::new());
        self.duration.set(1);
    }

    fn load(&self, habit: &Habit) {
        self.editing.set(Some(habit.id.clone()));
        self.title.set(habit.title.clone());
        self.days.set(habit.days.clone());
        self.duration.set(habit.duration);
    }

    fn toggle_day(&self, day: Weekday) {
        self.days.update(|days| {
            if !days.remove(&day) {
                days.insert(day);
            }
        });
    }
}

#[component]
pub fn HabitManagement() -> impl IntoView {
    let habits = use_habits();
    let form = HabitForm::new();
    let (submitting, set_submitting) = signal(false);

    // 每分钟刷新一次当前时间，让冷却中的习惯自动恢复可点击
    let now = RwSignal::new(Timestamp::now());
    let ticker = Interval::new(TICK_MILLIS, move || now.set(Timestamp::now()));
    StoredValue::new_local(ticker);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let title = form.title.get_untracked();
        let days = form.days.get_untracked();
        let duration = form.duration.get_untracked();
        let editing = form.editing.get_untracked();

        set_submitting.set(true);
        spawn_local(async move {
            let ok = match editing {
                Some(id) => habits.edit(id, title, days, duration).await,
                None => habits.add(title, days, duration).await,
            };
            if ok {
                form.reset();
            }
            set_submitting.set(false);
        });
    };

    let day_buttons = move || {
        Weekday::all()
            .map(|day| {
                let selected = move || form.days.with(|d| d.contains(&day));
                view! {
                    <button
                        type="button"
                        class=move || if selected() { "btn btn-sm btn-primary" } else { "btn btn-sm btn-outline" }
                        on:click=move |_| form.toggle_day(day)
                    >
                        {day.to_string()}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body gap-4" on:submit=on_submit>
                <h3 class="card-title">
                    {move || if form.editing.with(Option::is_some) { "Edit Habit" } else { "New Habit" }}
                </h3>
                <input
                    type="text"
                    placeholder="Habit title"
                    class="input input-bordered w-full"
                    on:input=move |ev| form.title.set(event_target_value(&ev))
                    prop:value=form.title
                />
                <div class="flex flex-wrap gap-2">{day_buttons}</div>
                <label class="form-control w-40">
                    <span class="label-text">"Duration (days)"</span>
                    <input
                        type="number"
                        min="1"
                        class="input input-bordered"
                        on:input=move |ev| {
                            form.duration.set(event_target_value(&ev).parse().unwrap_or(0));
                        }
                        prop:value=move || form.duration.get().to_string()
                    />
                </label>
                <div class="card-actions justify-end">
                    <Show when=move || form.editing.with(Option::is_some)>
                        <button type="button" class="btn btn-ghost" on:click=move |_| form.reset()>
                            "Cancel"
                        </button>
                    </Show>
                    <button class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if form.editing.with(Option::is_some) { "Save" } else { "Add Habit" }}
                    </button>
                </div>
            </form>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th></th>
                                <th>"Habit"</th>
                                <th class="hidden md:table-cell">"Days"</th>
                                <th>"Streak"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || habits.list.with(|l| l.is_empty())>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        {move || if habits.loading.get() { "Loading..." } else { "No habits yet." }}
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || habits.habits()
                                key=|h| h.clone()
                                children=move |habit| view! { <HabitRow habit=habit now=now form=form /> }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[component]
fn HabitRow(habit: Habit, now: RwSignal<Timestamp>, form: HabitForm) -> impl IntoView {
    let habits = use_habits();
    let cooldown = {
        let habit = habit.clone();
        move || streak::cooldown_remaining(&habit, now.get())
    };
    let locked = {
        let cooldown = cooldown.clone();
        move || cooldown().is_some()
    };

    let id = habit.id.clone();
    // 勾选状态只由列表决定：浏览器的默认切换被阻止，请求成功后才会变化
    let checked = {
        let id = id.clone();
        move || habits.is_checked(&id)
    };
    let on_toggle = {
        let id = id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            spawn_local(habits.toggle(id.clone()));
        }
    };
    let on_delete = {
        let id = id.clone();
        move |_| {
            let id = id.clone();
            spawn_local(async move {
                habits.delete(id).await;
            })
        }
    };
    let on_edit = {
        let habit = habit.clone();
        move |_| form.load(&habit)
    };

    let days = habit
        .days
        .iter()
        .map(|d| d.to_string().chars().take(3).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");

    view! {
        <tr>
            <td>
                <input
                    type="checkbox"
                    class="checkbox checkbox-primary"
                    prop:checked=checked
                    disabled=locked
                    on:click=on_toggle
                />
            </td>
            <td>
                <div class="font-bold">{habit.title.clone()}</div>
                <div class="text-xs opacity-60">
                    {move || cooldown().map(|left| format!("Available again in {}h", left.as_secs().div_ceil(3600)))}
                </div>
            </td>
            <td class="hidden md:table-cell font-mono text-xs">{days}</td>
            <td>
                <div class="badge badge-accent badge-outline">{habit.streak}</div>
            </td>
            <td class="flex gap-1">
                <button class="btn btn-ghost btn-sm" on:click=on_edit>"Edit"</button>
                <button class="btn btn-ghost btn-sm text-error" on:click=on_delete>"Delete"</button>
            </td>
        </tr>
    }
}
