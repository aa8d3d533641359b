use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{error, info};
use validator::Validate;

use common::error::ApiResult;
use common::request::auth::{ReqLogin, ReqRegister};
use common::response::user::{ResLogin, ResUser};

use crate::api::ApiClient;
use crate::session::{Session, SessionStore};

/// 登录状态, 通过 watch 通道广播给收货地址等依赖方
pub struct AuthContext {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    user: RwLock<Option<ResUser>>,
    authenticated: watch::Sender<bool>,
}

impl AuthContext {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        let (authenticated, _) = watch::channel(false);

        Self {
            api,
            store,
            user: RwLock::new(None),
            authenticated,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    pub async fn user(&self) -> Option<ResUser> {
        self.user.read().await.clone()
    }

    /// 启动时恢复本地会话, token 和用户信息缺一不可
    pub async fn load(&self) -> bool {
        match self.store.load().await {
            Ok(Some(session)) if !session.token.is_empty() => {
                self.sign_in(session).await;
                true
            }
            Ok(_) => false,
            Err(e) => {
                error!("Error loading user: {}", e);
                false
            }
        }
    }

    pub async fn login(&self, credentials: &ReqLogin) -> ApiResult<ResUser> {
        credentials.validate()?;

        let res: ResLogin = self.api.post("auth/login", credentials).await?;
        let session = Session {
            token: res.token,
            user: res.user.clone(),
        };
        self.store.save(&session).await?;
        self.sign_in(session).await;
        info!("user {} logged in", res.user.email);

        Ok(res.user)
    }

    /// 注册成功后需要手动登录
    pub async fn register(&self, data: &ReqRegister) -> ApiResult<ResUser> {
        data.validate()?;

        self.api.post("auth/register", data).await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.store.clear().await?;
        self.api.set_token(None).await;
        *self.user.write().await = None;
        self.authenticated.send_replace(false);

        Ok(())
    }

    /// 更新本地保存的用户资料
    pub async fn update_user(&self, user: ResUser) -> ApiResult<()> {
        if let Some(token) = self.api.token().await {
            self.store
                .save(&Session {
                    token,
                    user: user.clone(),
                })
                .await?;
        }
        *self.user.write().await = Some(user);

        Ok(())
    }

    async fn sign_in(&self, session: Session) {
        self.api.set_token(Some(session.token)).await;
        *self.user.write().await = Some(session.user);
        self.authenticated.send_replace(true);
    }
}
