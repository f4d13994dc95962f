use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

pub mod date;
pub mod protocol;

pub use date::{MILLIS_PER_DAY, Timestamp};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_THEME_KEY: &str = "theme";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

// =========================================================
// 标识符
// =========================================================

/// 服务端分配的记录 ID
///
/// 不同后端可能返回数字或字符串，两种形式都原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Text(s.to_string())
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 习惯的计划日，序列化为英文全称（"Monday" ...），解析时忽略大小写
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// 一周七天，周一开始
    pub fn all() -> impl Iterator<Item = Weekday> {
        Weekday::iter()
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.trim()
            .parse()
            .map_err(|_| serde::de::Error::unknown_variant(&name, WEEKDAY_NAMES))
    }
}

const WEEKDAY_NAMES: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub type DaySet = BTreeSet<Weekday>;

/// 服务端记录中的计划日：无法识别的条目被跳过，不影响整条记录
fn lenient_days<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<DaySet, D::Error> {
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .iter()
        .filter_map(|v| v.as_str()?.trim().parse().ok())
        .collect())
}

fn default_duration() -> u32 {
    1
}

/// 服务端持久化的习惯记录
///
/// 不变量：`checked == true` 意味着 `last_checked` 不为空。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_days")]
    pub days: DaySet,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_checked: Option<Timestamp>,
    #[serde(default)]
    pub checked: bool,
}

impl Habit {
    pub fn is_consistent(&self) -> bool {
        !self.checked || self.last_checked.is_some()
    }
}

/// 创建习惯的请求体（不含 id）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub title: String,
    pub body: String,
    pub days: DaySet,
    pub duration: u32,
    pub streak: u32,
    pub last_checked: Option<Timestamp>,
    pub checked: bool,
}

impl NewHabit {
    /// 新记录总是从零开始：未打卡、无连续记录
    pub fn fresh(title: String, days: DaySet, duration: u32) -> Self {
        Self {
            body: title.clone(),
            title,
            days,
            duration,
            streak: 0,
            last_checked: None,
            checked: false,
        }
    }
}

/// 编辑习惯的部分更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitPatch {
    pub title: String,
    pub body: String,
    pub days: DaySet,
    pub duration: u32,
}

/// 打卡状态的部分更新
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPatch {
    pub checked: bool,
    pub last_checked: Timestamp,
    pub streak: u32,
}

// =========================================================
// 认证模型
// =========================================================

/// 用户身份
///
/// 登录接口返回的 user 对象或 token 解码后的 claims，
/// 除 `id`/`username` 之外的字段原样保存在 `claims` 中。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("Guest")
    }
}

/// 登录 / 注册请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// 登录 / 注册成功响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub user: User,
    pub token: String,
}

/// 服务端错误响应体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_habit_parses_server_record() {
        let habit: Habit = serde_json::from_value(json!({
            "id": 7,
            "title": "Read",
            "body": "Read",
            "days": ["Monday", "Friday"],
            "duration": 3,
            "streak": 2,
            "lastChecked": 1_700_000_000_000_i64,
            "checked": true,
            "userId": 1
        }))
        .unwrap();

        assert_eq!(habit.id, Id::Number(7));
        assert!(habit.days.contains(&Weekday::Friday));
        assert_eq!(habit.last_checked, Some(Timestamp::from_millis(1_700_000_000_000)));
        assert!(habit.is_consistent());
    }

    #[test]
    fn test_habit_defaults_for_sparse_record() {
        let habit: Habit = serde_json::from_value(json!({ "id": "abc", "title": "Walk" })).unwrap();
        assert_eq!(habit.id, Id::Text("abc".into()));
        assert_eq!(habit.duration, 1);
        assert_eq!(habit.streak, 0);
        assert!(!habit.checked);
        assert!(habit.last_checked.is_none());
    }

    #[test]
    fn test_new_habit_wire_shape() {
        let days: DaySet = [Weekday::Monday].into_iter().collect();
        let value = serde_json::to_value(NewHabit::fresh("Read".into(), days, 3)).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Read",
                "body": "Read",
                "days": ["Monday"],
                "duration": 3,
                "streak": 0,
                "lastChecked": null,
                "checked": false
            })
        );
    }

    #[test]
    fn test_user_keeps_extra_claims() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "emilys",
            "exp": 1_900_000_000
        }))
        .unwrap();
        assert_eq!(user.display_name(), "emilys");
        assert_eq!(user.claims.get("exp"), Some(&json!(1_900_000_000)));
        assert_eq!(User::default().display_name(), "Guest");
    }

    #[test]
    fn test_weekdays_start_on_monday() {
        let days: Vec<_> = Weekday::all().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], Weekday::Monday);
        assert_eq!(days[6].to_string(), "Sunday");
    }

    #[test]
    fn test_weekday_parsing_ignores_case() {
        let day: Weekday = serde_json::from_value(json!("monday")).unwrap();
        assert_eq!(day, Weekday::Monday);
        assert_eq!(" SUNDAY ".trim().parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!(serde_json::from_value::<Weekday>(json!("Funday")).is_err());
    }

    #[test]
    fn test_habit_skips_unrecognised_days() {
        let habit: Habit = serde_json::from_value(json!({
            "id": 3,
            "title": "Swim",
            "days": ["monday", "Funday", 5, "FRIDAY"]
        }))
        .unwrap();
        let days: Vec<_> = habit.days.into_iter().collect();
        assert_eq!(days, [Weekday::Monday, Weekday::Friday]);

        let habit: Habit =
            serde_json::from_value(json!({ "id": 4, "title": "Nap", "days": null })).unwrap();
        assert!(habit.days.is_empty());
    }
}
