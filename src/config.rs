//! 运行时配置
//!
//! 前端以静态资源形式部署，配置在编译期通过环境变量注入，缺省时使用默认值。

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_AUTH_SCHEME: &str = "Token";

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 习惯接口的基础 URL（不含末尾斜杠）
    pub api_base_url: String,
    pub login_url: String,
    pub register_url: String,
    /// Authorization 头的方案前缀，如 "Token" 或 "Bearer"
    pub auth_scheme: String,
}

impl ClientConfig {
    /// 以基础 URL 推导登录/注册地址
    pub fn new(api_base_url: &str) -> Self {
        let base = api_base_url.trim_end_matches('/').to_string();
        Self {
            login_url: format!("{}/auth/login", base),
            register_url: format!("{}/auth/register", base),
            api_base_url: base,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
        }
    }

    /// 读取编译期环境变量
    ///
    /// - `HABIT_API_BASE_URL`
    /// - `HABIT_LOGIN_URL`
    /// - `HABIT_REGISTER_URL`
    /// - `HABIT_AUTH_SCHEME`
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("HABIT_API_BASE_URL"),
            option_env!("HABIT_LOGIN_URL"),
            option_env!("HABIT_REGISTER_URL"),
            option_env!("HABIT_AUTH_SCHEME"),
        )
    }

    fn from_vars(
        base: Option<&str>,
        login: Option<&str>,
        register: Option<&str>,
        scheme: Option<&str>,
    ) -> Self {
        fn non_empty(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }

        let mut config = Self::new(non_empty(base).unwrap_or(DEFAULT_API_BASE_URL));
        if let Some(url) = non_empty(login) {
            config.login_url = url.to_string();
        }
        if let Some(url) = non_empty(register) {
            config.register_url = url.to_string();
        }
        if let Some(s) = non_empty(scheme) {
            config.auth_scheme = s.to_string();
        }
        config
    }

    /// 拼接接口路径
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }

    pub fn authorization(&self, token: &str) -> String {
        format!("{} {}", self.auth_scheme, token)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_derives_auth_urls() {
        let config = ClientConfig::new("https://api.example.com/v1/");
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.login_url, "https://api.example.com/v1/auth/login");
        assert_eq!(config.register_url, "https://api.example.com/v1/auth/register");
        assert_eq!(config.url("/habits/"), "https://api.example.com/v1/habits/");
        assert_eq!(config.url("habits/"), "https://api.example.com/v1/habits/");
    }

    #[test]
    fn test_vars_override_defaults() {
        let config = ClientConfig::from_vars(
            Some("https://h.example"),
            Some("https://auth.example/login"),
            Some("  "),
            Some("Bearer"),
        );
        assert_eq!(config.login_url, "https://auth.example/login");
        assert_eq!(config.register_url, "https://h.example/auth/register");
        assert_eq!(config.authorization("abc"), "Bearer abc");
    }

    #[test]
    fn test_missing_vars_use_defaults() {
        let config = ClientConfig::from_vars(None, None, None, None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.authorization("t"), "Token t");
    }
}
