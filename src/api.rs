use crate::config::ClientConfig;
use crate::error::{HabitError, HabitErrorStatus, HabitResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use habit_shared::protocol::{
    ApiRequest, DeleteHabitRequest, HttpMethod, ListHabitsRequest, UpdateHabitRequest,
};
use habit_shared::{
    AuthPayload, CheckPatch, Credentials, DEFAULT_ERROR_MESSAGE, ErrorBody, HEADER_AUTHORIZATION,
    Habit, HabitPatch, Id, NewHabit,
};
use std::rc::Rc;

/// 从非 2xx 响应中提取错误
///
/// 优先使用响应体中的 `message`，否则使用通用提示。
fn error_from_response(resp: &HttpResponse) -> HabitError {
    let message = resp
        .json::<ErrorBody>()
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
    HabitError::new(HabitErrorStatus::from_http_status(resp.status), message)
        .in_op_with("http.status", resp.status.to_string())
}

// =========================================================
// 习惯接口
// =========================================================

/// 已认证的习惯接口客户端
///
/// 每个请求都携带 `Authorization: <scheme> <token>`。
#[derive(Clone)]
pub struct HabitApi<C> {
    client: C,
    config: Rc<ClientConfig>,
    token: String,
}

impl<C: HttpClient> HabitApi<C> {
    pub fn new(client: C, config: Rc<ClientConfig>, token: impl Into<String>) -> Self {
        Self {
            client,
            config,
            token: token.into(),
        }
    }

    /// 发送强类型请求并获取解析后的响应
    pub async fn send<T: ApiRequest>(&self, req: &T) -> HabitResult<T::Response> {
        let path = req.path();
        let url = self.config.url(&path);

        let mut http = HttpRequest::new(&url, T::METHOD)
            .with_header(HEADER_AUTHORIZATION, &self.config.authorization(&self.token));
        if let Some(body) = req.body() {
            let body = serde_json::to_string(body)
                .map_err(|e| HabitError::from(e).in_op_with("api.serialize", path.clone()))?;
            http = http.with_json_body(body);
        }

        let resp = self
            .client
            .send(http)
            .await
            .map_err(|e| HabitError::from(e).in_op_with("api.send", path.clone()))?;

        if !resp.ok() {
            return Err(error_from_response(&resp).in_op_with("api.send", path));
        }

        resp.json::<T::Response>()
            .map_err(|e| HabitError::from(e).in_op_with("api.parse", path))
    }

    pub async fn list_habits(&self) -> HabitResult<Vec<Habit>> {
        self.send(&ListHabitsRequest).await
    }

    pub async fn create_habit(&self, habit: &NewHabit) -> HabitResult<Habit> {
        self.send(habit).await
    }

    pub async fn update_habit(&self, id: Id, patch: HabitPatch) -> HabitResult<Habit> {
        self.send(&UpdateHabitRequest { id, patch }).await
    }

    pub async fn set_check(&self, id: Id, patch: CheckPatch) -> HabitResult<Habit> {
        self.send(&UpdateHabitRequest { id, patch }).await
    }

    pub async fn delete_habit(&self, id: Id) -> HabitResult<()> {
        self.send(&DeleteHabitRequest { id }).await.map(|_| ())
    }
}

// =========================================================
// 认证接口
// =========================================================

/// 未认证的登录 / 注册客户端
#[derive(Clone)]
pub struct AuthApi<C> {
    client: C,
    config: Rc<ClientConfig>,
}

impl<C: HttpClient> AuthApi<C> {
    pub fn new(client: C, config: Rc<ClientConfig>) -> Self {
        Self { client, config }
    }

    pub async fn login(&self, credentials: &Credentials) -> HabitResult<AuthPayload> {
        self.post(&self.config.login_url, credentials)
            .await
            .map_err(|e| e.in_op("auth.login"))
    }

    pub async fn register(&self, credentials: &Credentials) -> HabitResult<AuthPayload> {
        self.post(&self.config.register_url, credentials)
            .await
            .map_err(|e| e.in_op("auth.register"))
    }

    async fn post(&self, url: &str, credentials: &Credentials) -> HabitResult<AuthPayload> {
        let body = serde_json::to_string(credentials)?;
        let req = HttpRequest::new(url, HttpMethod::Post).with_json_body(body);

        // 网络层失败没有响应体可读，统一给出通用提示
        let resp = self.client.send(req).await.map_err(|e| {
            log::error!("auth request to {} failed: {}", url, e);
            HabitError::network(DEFAULT_ERROR_MESSAGE).with_source(e)
        })?;

        if !resp.ok() {
            return Err(error_from_response(&resp));
        }
        Ok(resp.json::<AuthPayload>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockHttpClient;
    use serde_json::json;

    const BASE: &str = "https://api.test";

    fn config() -> Rc<ClientConfig> {
        Rc::new(ClientConfig::new(BASE))
    }

    fn habit_json(id: i64, title: &str) -> serde_json::Value {
        json!({
            "id": id, "title": title, "body": title, "days": ["Monday"],
            "duration": 3, "streak": 0, "lastChecked": null, "checked": false
        })
    }

    #[tokio::test]
    async fn test_list_habits_sends_token_header() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_response(
            HttpMethod::Get,
            "https://api.test/habits/",
            200,
            json!([habit_json(1, "Read"), habit_json(2, "Walk")]),
        );
        let api = HabitApi::new(client.clone(), config(), "tok");

        let habits = api.list_habits().await.unwrap();
        assert_eq!(habits.len(), 2);

        let req = client.last_request().unwrap();
        assert_eq!(req.header("Authorization"), Some("Token tok"));
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_empty(HttpMethod::Delete, "https://api.test/habits/5/", 204);
        let api = HabitApi::new(client.clone(), config(), "tok");

        api.delete_habit(Id::Number(5)).await.unwrap();
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_ignores_response_body() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_response(HttpMethod::Delete, "https://api.test/habits/5/", 200, json!({}));
        client.mock_response(HttpMethod::Delete, "https://api.test/habits/6/", 200, habit_json(6, "Run"));
        let api = HabitApi::new(client.clone(), config(), "tok");

        api.delete_habit(Id::Number(5)).await.unwrap();
        api.delete_habit(Id::Number(6)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_sends_patch_body() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_response(HttpMethod::Patch, "https://api.test/habits/3/", 200, habit_json(3, "Run"));
        let api = HabitApi::new(client.clone(), config(), "tok");

        let patch = HabitPatch {
            title: "Run".into(),
            body: "Run".into(),
            days: Default::default(),
            duration: 2,
        };
        let updated = api.update_habit(Id::Number(3), patch).await.unwrap();
        assert_eq!(updated.title, "Run");

        let req = client.last_request().unwrap();
        assert_eq!(req.header("content-type"), Some("application/json"));
        let sent: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["duration"], 2);
    }

    #[tokio::test]
    async fn test_non_2xx_maps_status_and_message() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_response(
            HttpMethod::Get,
            "https://api.test/habits/",
            401,
            json!({ "message": "Invalid token." }),
        );
        let api = HabitApi::new(client, config(), "expired");

        let err = api.list_habits().await.unwrap_err();
        assert_eq!(err.status, HabitErrorStatus::Unauthorized);
        assert_eq!(err.message(), "Invalid token.");
    }

    #[tokio::test]
    async fn test_network_error_is_reported() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_network_error(HttpMethod::Get, "https://api.test/habits/");
        let api = HabitApi::new(client, config(), "tok");

        let err = api.list_habits().await.unwrap_err();
        assert_eq!(err.status, HabitErrorStatus::Network);
    }

    #[tokio::test]
    async fn test_login_success_and_failure_message() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_response(
            HttpMethod::Post,
            "https://api.test/auth/login",
            200,
            json!({ "user": { "id": 1, "username": "emily" }, "token": "jwt" }),
        );
        client.mock_response(
            HttpMethod::Post,
            "https://api.test/auth/register",
            400,
            json!({ "detail": "nope" }),
        );
        let api = AuthApi::new(client.clone(), config());
        let creds = Credentials {
            username: "emily".into(),
            password: "pw".into(),
            email: None,
        };

        let payload = api.login(&creds).await.unwrap();
        assert_eq!(payload.token, "jwt");
        assert_eq!(payload.user.display_name(), "emily");
        let sent: serde_json::Value =
            serde_json::from_str(client.last_request().unwrap().body.as_deref().unwrap()).unwrap();
        assert!(sent.get("email").is_none());

        let err = api.register(&creds).await.unwrap_err();
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
    }
}
