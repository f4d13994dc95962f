//! Token 解码
//!
//! 只读取 JWT payload 段中的声明，不校验签名：签名由服务端负责，
//! 客户端只需要知道 token 何时过期以及它代表哪个用户。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use habit_shared::{Timestamp, User};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// 解码后的声明
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// 过期时间（秒）
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub user: User,
}

impl TokenClaims {
    /// `exp * 1000 > now` 才视为有效；没有 `exp` 的 token 一律视为过期
    pub fn is_live(&self, now: Timestamp) -> bool {
        match self.exp {
            Some(exp) => Timestamp::from_secs(exp) > now,
            None => false,
        }
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.exp.map(Timestamp::from_secs)
    }
}

/// 解码 JWT 的 payload 段
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts[1].is_empty() {
        return Err(TokenError::Malformed);
    }
    // 部分签发方会保留 '=' 填充
    let payload = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('='))?;
    let mut claims: TokenClaims = serde_json::from_slice(&payload)?;
    // exp 已单独解析，保留在 claims 里一份方便界面展示完整身份
    if let Some(exp) = claims.exp {
        claims.user.claims.insert("exp".to_string(), exp.into());
    }
    Ok(claims)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// 构造一个未签名的测试 JWT
    pub(crate) fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn test_decode_reads_exp_and_identity() {
        let token = make_token(json!({ "id": 9, "username": "ana", "exp": 2_000_000_000 }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(2_000_000_000));
        assert_eq!(claims.user.display_name(), "ana");
        assert_eq!(claims.expires_at(), Some(Timestamp::from_secs(2_000_000_000)));
    }

    #[test]
    fn test_liveness_compares_in_millis() {
        let token = make_token(json!({ "exp": 1_000 }));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.is_live(Timestamp::from_millis(999_999)));
        assert!(!claims.is_live(Timestamp::from_millis(1_000_000)));
    }

    #[test]
    fn test_missing_exp_is_not_live() {
        let token = make_token(json!({ "username": "ana" }));
        let claims = decode_claims(&token).unwrap();
        assert!(!claims.is_live(Timestamp::from_millis(0)));
    }

    #[test]
    fn test_malformed_tokens_fail() {
        assert!(matches!(decode_claims("opaque"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a..c"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Encoding(_))));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(decode_claims(&not_json), Err(TokenError::Json(_))));
    }
}
