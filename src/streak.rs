//! 打卡 / 连续记录状态机
//!
//! 每个习惯处于 `Checked` 或 `Unchecked`，由 `checked` 与 `last_checked` 决定。
//! 上次打卡后 24 小时内的切换请求会被丢弃；冷却期结束后，切换会翻转
//! `checked`、记录当前时间并使连续记录加一。
//!
//! 勾选与取消勾选对连续记录的影响相同，没有递减路径。

use habit_shared::{CheckPatch, Habit, MILLIS_PER_DAY, Timestamp};
use std::time::Duration;

/// 冷却期内距离下一次可切换的剩余时间；不在冷却期时返回 `None`
pub fn cooldown_remaining(habit: &Habit, now: Timestamp) -> Option<Duration> {
    let last = habit.last_checked?;
    let elapsed = now.millis_since(last);
    if elapsed < MILLIS_PER_DAY {
        Some(Duration::from_millis((MILLIS_PER_DAY - elapsed.max(0)) as u64))
    } else {
        None
    }
}

pub fn can_toggle(habit: &Habit, now: Timestamp) -> bool {
    cooldown_remaining(habit, now).is_none()
}

/// 计算一次切换请求的结果
///
/// 冷却期内返回 `None`（请求被丢弃，不发网络请求）。
pub fn toggle(habit: &Habit, now: Timestamp) -> Option<CheckPatch> {
    if !can_toggle(habit, now) {
        return None;
    }
    let streak = if habit.last_checked.is_some() {
        habit.streak.saturating_add(1)
    } else {
        1
    };
    Some(CheckPatch {
        checked: !habit.checked,
        last_checked: now,
        streak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use habit_shared::Id;

    const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000);

    fn habit() -> Habit {
        Habit {
            id: Id::Number(1),
            title: "Read".into(),
            body: "Read".into(),
            days: Default::default(),
            duration: 3,
            streak: 0,
            last_checked: None,
            checked: false,
        }
    }

    /// 模拟服务端接受补丁后返回的记录
    fn apply(habit: &Habit, patch: CheckPatch) -> Habit {
        Habit {
            checked: patch.checked,
            last_checked: Some(patch.last_checked),
            streak: patch.streak,
            ..habit.clone()
        }
    }

    fn later(ms: i64) -> Timestamp {
        Timestamp::from_millis(T0.as_millis() + ms)
    }

    #[test]
    fn test_first_toggle_starts_streak_at_one() {
        let patch = toggle(&habit(), T0).unwrap();
        assert!(patch.checked);
        assert_eq!(patch.streak, 1);
        assert_eq!(patch.last_checked, T0);

        let checked = apply(&habit(), patch);
        assert!(checked.is_consistent());
    }

    #[test]
    fn test_first_toggle_ignores_stale_streak() {
        let mut h = habit();
        h.streak = 5;
        assert_eq!(toggle(&h, T0).unwrap().streak, 1);
    }

    #[test]
    fn test_toggle_within_cooldown_is_dropped() {
        let checked = apply(&habit(), toggle(&habit(), T0).unwrap());
        assert_eq!(toggle(&checked, T0), None);
        assert_eq!(toggle(&checked, later(MILLIS_PER_DAY - 1)), None);
        assert_eq!(
            cooldown_remaining(&checked, later(MILLIS_PER_DAY - 1_000)),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_uncheck_after_cooldown_still_increments() {
        let checked = apply(&habit(), toggle(&habit(), T0).unwrap());
        let patch = toggle(&checked, later(MILLIS_PER_DAY)).unwrap();
        assert!(!patch.checked);
        assert_eq!(patch.streak, 2);
        assert!(can_toggle(&checked, later(MILLIS_PER_DAY)));
    }

    #[test]
    fn test_unchecked_with_recent_timestamp_is_in_cooldown() {
        let mut h = habit();
        h.last_checked = Some(T0);
        h.streak = 2;
        assert_eq!(toggle(&h, later(1_000)), None);
    }

    #[test]
    fn test_extreme_last_checked_does_not_overflow() {
        let mut h = habit();
        h.last_checked = Some(Timestamp::from_millis(i64::MIN));
        assert!(can_toggle(&h, T0));
        assert_eq!(toggle(&h, T0).unwrap().streak, 1);

        h.last_checked = Some(Timestamp::from_millis(i64::MAX));
        assert_eq!(toggle(&h, T0), None);
    }

    #[test]
    fn test_clock_skew_keeps_full_cooldown() {
        let checked = apply(&habit(), toggle(&habit(), T0).unwrap());
        assert_eq!(
            cooldown_remaining(&checked, later(-5_000)),
            Some(Duration::from_millis(MILLIS_PER_DAY as u64))
        );
    }
}
