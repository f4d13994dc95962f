//! HTTP 抽象层
//!
//! 核心逻辑只依赖 `HttpClient` trait，浏览器端由前端 crate 基于 `fetch` 实现，
//! 测试中使用 `MockHttpClient`。

use habit_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;
use std::rc::Rc;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 传输错误
// =========================================================

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("request build failed: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    NetworkError(String),
    /// 响应读取失败
    #[error("response read failed: {0}")]
    ResponseReadFailed(String),
}

// =========================================================
// 请求 / 响应
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体，同时补上 Content-Type
    pub fn with_json_body(self, body: String) -> Self {
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = Some(body);
        req
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体，空响应体按 `null` 处理（204 No Content）
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        if self.body.trim().is_empty() {
            serde_json::from_str("null")
        } else {
            serde_json::from_str(&self.body)
        }
    }
}

// =========================================================
// 核心抽象
// =========================================================

/// 浏览器的 fetch future 不是 `Send`，因此使用 `?Send`
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for Rc<T> {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // "METHOD url" -> (Status, Response Body) 或网络错误
    responses: RefCell<HashMap<String, Result<(u16, String), String>>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Ok((status, body.to_string())));
    }

    pub fn mock_empty(&self, method: HttpMethod, url: &str, status: u16) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Ok((status, String::new())));
    }

    pub fn mock_network_error(&self, method: HttpMethod, url: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Err("connection refused".to_string()));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let key = Self::key(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        match self.responses.borrow().get(&key) {
            Some(Ok((status, body))) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(Err(msg)) => Err(HttpError::NetworkError(msg.clone())),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
