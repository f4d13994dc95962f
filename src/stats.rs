//! 仪表盘统计

use habit_shared::Habit;

/// 图表中的一个数据点：习惯标题与其连续记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakPoint {
    pub title: String,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HabitSummary {
    pub total: usize,
    pub completed: usize,
    pub total_streaks: u64,
    /// 最近一次打卡且当前处于已勾选状态的习惯标题
    pub last_checked: Option<String>,
    /// 按集合顺序排列
    pub series: Vec<StreakPoint>,
}

impl HabitSummary {
    pub fn from_habits(habits: &[Habit]) -> Self {
        let last_checked = habits
            .iter()
            .filter(|h| h.checked)
            .filter_map(|h| h.last_checked.map(|ts| (ts, h)))
            // 时间相同取集合中靠前的一个
            .fold(None::<(habit_shared::Timestamp, &Habit)>, |best, (ts, h)| match best {
                Some((best_ts, _)) if best_ts >= ts => best,
                _ => Some((ts, h)),
            })
            .map(|(_, h)| h.title.clone());

        Self {
            total: habits.len(),
            completed: habits.iter().filter(|h| h.checked).count(),
            total_streaks: habits.iter().map(|h| u64::from(h.streak)).sum(),
            last_checked,
            series: habits
                .iter()
                .map(|h| StreakPoint {
                    title: h.title.clone(),
                    streak: h.streak,
                })
                .collect(),
        }
    }

    pub fn max_streak(&self) -> u32 {
        self.series.iter().map(|p| p.streak).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habit_shared::{Id, Timestamp};

    fn habit(id: i64, title: &str, streak: u32, last: Option<i64>, checked: bool) -> Habit {
        Habit {
            id: Id::Number(id),
            title: title.into(),
            body: title.into(),
            days: Default::default(),
            duration: 1,
            streak,
            last_checked: last.map(Timestamp::from_millis),
            checked,
        }
    }

    #[test]
    fn test_empty_collection() {
        let summary = HabitSummary::from_habits(&[]);
        assert_eq!(summary, HabitSummary::default());
        assert_eq!(summary.max_streak(), 0);
    }

    #[test]
    fn test_summary_counts() {
        let habits = vec![
            habit(1, "Read", 3, Some(100), true),
            habit(2, "Walk", 5, Some(300), false),
            habit(3, "Code", 1, Some(200), true),
            habit(4, "Nap", 0, None, false),
        ];
        let summary = HabitSummary::from_habits(&habits);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total_streaks, 9);
        // "Walk" 更晚但未勾选
        assert_eq!(summary.last_checked.as_deref(), Some("Code"));
        assert_eq!(summary.max_streak(), 5);

        let titles: Vec<_> = summary.series.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Read", "Walk", "Code", "Nap"]);
    }

    #[test]
    fn test_last_checked_tie_prefers_first() {
        let habits = vec![
            habit(1, "First", 1, Some(500), true),
            habit(2, "Second", 1, Some(500), true),
        ];
        let summary = HabitSummary::from_habits(&habits);
        assert_eq!(summary.last_checked.as_deref(), Some("First"));
    }
}
