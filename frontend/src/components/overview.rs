use crate::habits::use_habits;
use habit_tracker::stats::HabitSummary;
use leptos::prelude::*;

const CHART_HEIGHT: f64 = 160.0;
const BAR_WIDTH: f64 = 32.0;
const BAR_GAP: f64 = 16.0;

/// 统计卡片与连续记录柱状图
#[component]
pub fn Overview() -> impl IntoView {
    let habits = use_habits();
    let summary = Memo::new(move |_| habits.list.with(|l| HabitSummary::from_habits(l.habits())));

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Total Habits"</div>
                <div class="stat-value text-primary">{move || summary.with(|s| s.total)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Completed"</div>
                <div class="stat-value text-success">{move || summary.with(|s| s.completed)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Total Streaks"</div>
                <div class="stat-value text-secondary">{move || summary.with(|s| s.total_streaks)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Last Checked"</div>
                <div class="stat-value text-2xl">
                    {move || summary.with(|s| s.last_checked.clone().unwrap_or_else(|| "None yet".to_string()))}
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Streaks"</h3>
                <Show
                    when=move || summary.with(|s| !s.series.is_empty())
                    fallback=move || view! {
                        <p class="text-base-content/50 py-8 text-center">
                            {move || if habits.loading.get() { "Loading..." } else { "No habits yet. Add one to get started." }}
                        </p>
                    }
                >
                    <StreakChart summary=summary />
                </Show>
            </div>
        </div>
    }
}

#[component]
fn StreakChart(summary: Memo<HabitSummary>) -> impl IntoView {
    move || {
        summary.with(|s| {
            let max = f64::from(s.max_streak().max(1));
            let width = (s.series.len() as f64) * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
            let bars = s
                .series
                .iter()
                .enumerate()
                .map(|(i, point)| {
                    let height = f64::from(point.streak) / max * CHART_HEIGHT;
                    let x = BAR_GAP + (i as f64) * (BAR_WIDTH + BAR_GAP);
                    let y = CHART_HEIGHT - height;
                    view! {
                        <g>
                            <title>{format!("{}: {}", point.title, point.streak)}</title>
                            <rect x=x.to_string() y=y.to_string() width=BAR_WIDTH.to_string() height=height.to_string() rx="4" class="fill-primary"></rect>
                            <text x=(x + BAR_WIDTH / 2.0).to_string() y=(CHART_HEIGHT + 14.0).to_string() text-anchor="middle" class="fill-current text-xs">
                                {point.streak}
                            </text>
                        </g>
                    }
                })
                .collect_view();

            view! {
                <div class="overflow-x-auto">
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width=width.to_string()
                        height=(CHART_HEIGHT + 20.0).to_string()
                        viewBox=format!("0 0 {} {}", width, CHART_HEIGHT + 20.0)
                    >
                        {bars}
                    </svg>
                </div>
            }
        })
    }
}
