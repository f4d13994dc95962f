use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
///
/// 对应三类失败：本地校验（不发请求）、网络/认证失败、token 解码失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitErrorStatus {
    /// 本地校验失败，未发出任何请求
    Validation,
    /// 401/403: 鉴权失败
    Unauthorized,
    /// 404: 资源未找到
    NotFound,
    /// 请求未能送达或未收到响应
    Network,
    /// 其他非 2xx 响应
    Server,
    /// JSON 解析或序列化错误
    Serialization,
}

impl HabitErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            HabitErrorStatus::Validation => "VALIDATION",
            HabitErrorStatus::Unauthorized => "UNAUTHORIZED",
            HabitErrorStatus::NotFound => "NOT_FOUND",
            HabitErrorStatus::Network => "NETWORK",
            HabitErrorStatus::Server => "SERVER",
            HabitErrorStatus::Serialization => "SERIALIZATION",
        }
    }

    /// 将非 2xx 状态码映射为错误状态
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 | 403 => HabitErrorStatus::Unauthorized,
            404 => HabitErrorStatus::NotFound,
            _ => HabitErrorStatus::Server,
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "habits.add", "auth.login"
    pub operation: String,
    /// 额外的细节信息，如 habit id
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端领域错误
///
/// - status: 错误类型/语义
/// - message: 面向用户的错误消息
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct HabitError {
    pub status: HabitErrorStatus,
    pub message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl HabitError {
    pub fn new(status: HabitErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(HabitErrorStatus::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(HabitErrorStatus::NotFound, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(HabitErrorStatus::Network, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(HabitErrorStatus::Serialization, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    /// 面向用户展示的消息（不含追踪栈）
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_validation(&self) -> bool {
        self.status == HabitErrorStatus::Validation
    }
}

impl fmt::Display for HabitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for HabitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type HabitResult<T> = std::result::Result<T, HabitError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<crate::request::HttpError> for HabitError {
    fn from(e: crate::request::HttpError) -> Self {
        HabitError::network(e.to_string()).with_source(e)
    }
}

impl From<serde_json::Error> for HabitError {
    fn from(e: serde_json::Error) -> Self {
        HabitError::serialization(e.to_string()).with_source(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_includes_trace() {
        let err = HabitError::not_found("Habit not found")
            .in_op_with("habits.delete", "42")
            .in_op("dashboard");
        assert_eq!(
            err.to_string(),
            "[NOT_FOUND] Habit not found | trace: habits.delete(42) -> dashboard"
        );
        assert_eq!(err.message(), "Habit not found");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(HabitErrorStatus::from_http_status(401), HabitErrorStatus::Unauthorized);
        assert_eq!(HabitErrorStatus::from_http_status(403), HabitErrorStatus::Unauthorized);
        assert_eq!(HabitErrorStatus::from_http_status(404), HabitErrorStatus::NotFound);
        assert_eq!(HabitErrorStatus::from_http_status(500), HabitErrorStatus::Server);
        assert_eq!(HabitErrorStatus::from_http_status(422), HabitErrorStatus::Server);
    }

    #[test]
    fn test_serde_error_keeps_source() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = HabitError::from(parse_err);
        assert_eq!(err.status, HabitErrorStatus::Serialization);
        assert!(err.source().is_some());
    }
}
