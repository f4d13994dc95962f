//! 时间类型模块
//!
//! `Timestamp` 是可序列化的毫秒时间戳，直接对应服务端 `lastChecked` 字段
//! （JSON 中为数字或 `null`）。

use serde::{Deserialize, Serialize};

/// 一天的毫秒数，打卡冷却期
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// 从秒值创建（JWT 的 `exp` 声明以秒为单位）
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 当前墙钟时间
    ///
    /// wasm32 上 chrono 通过 `wasmbind` 读取 `Date.now()`。
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// 距离 `earlier` 经过的毫秒数，时钟回拨时可能为负，极端值饱和
    #[inline]
    pub const fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}
