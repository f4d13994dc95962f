//! 会话引导
//!
//! 唯一读写持久化 token 的组件。其他组件只消费 [`Session`]，
//! 从不直接访问存储。

use crate::auth::{AuthAction, Session, reduce};
use crate::storage::KeyValueStore;
use crate::token::decode_claims;
use habit_shared::{STORAGE_TOKEN_KEY, Timestamp};

pub struct SessionManager<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 启动时恢复会话
    ///
    /// 1. 没有持久化 token：保持匿名
    /// 2. token 可解码且未过期：以解码出的声明作为用户身份恢复会话
    /// 3. 其余情况（过期、缺少 exp、格式错误）：清除 token，保持匿名
    pub fn restore(&self, now: Timestamp) -> Session {
        let Some(token) = self.storage.get(STORAGE_TOKEN_KEY) else {
            log::debug!("no persisted token, starting anonymous");
            return Session::anonymous();
        };

        match decode_claims(&token) {
            Ok(claims) if claims.is_live(now) => {
                log::info!(
                    "restored session for {} (expires at {:?})",
                    claims.user.display_name(),
                    claims.expires_at()
                );
                reduce(
                    Session::anonymous(),
                    AuthAction::LoginSuccess {
                        user: claims.user,
                        token,
                    },
                )
            }
            Ok(_) => {
                log::info!("persisted token expired, clearing");
                self.dispatch(Session::anonymous(), AuthAction::Logout)
            }
            Err(e) => {
                log::warn!("persisted token unreadable, clearing: {}", e);
                self.dispatch(Session::anonymous(), AuthAction::Logout)
            }
        }
    }

    /// 应用认证动作，并同步持久化的 token
    pub fn dispatch(&self, session: Session, action: AuthAction) -> Session {
        let next = reduce(session, action);
        match next.token() {
            Some(token) => {
                if !self.storage.set(STORAGE_TOKEN_KEY, token) {
                    log::warn!("failed to persist token");
                }
            }
            None => {
                self.storage.delete(STORAGE_TOKEN_KEY);
            }
        }
        next
    }
}
