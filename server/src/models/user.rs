use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use common::application::SeedUser;
use common::error::{ApiError, ApiResult};
use common::pwd::{Md5Encoder, PassWordAnalyze};
use common::request::auth::{ReqLogin, ReqRegister};
use common::response::user::ResUser;

/// 账号记录, 密码只保存 md5
#[derive(Debug, Clone)]
pub struct UserModel {
    pub user: ResUser,
    password: String,
}

#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<UserModel>>,
}

impl UserStore {
    pub fn new(seeds: &[SeedUser]) -> Self {
        let users = seeds
            .iter()
            .map(|seed| UserModel {
                user: ResUser {
                    id: seed.id.clone(),
                    name: seed.name.clone(),
                    email: seed.email.clone(),
                    phone: seed.phone.clone(),
                    avatar: None,
                },
                password: Md5Encoder::encode(&seed.password),
            })
            .collect();

        Self {
            users: RwLock::new(users),
        }
    }

    /// 邮箱和密码校验
    pub async fn login(&self, payload: &ReqLogin) -> ApiResult<ResUser> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|row| row.user.email.eq_ignore_ascii_case(&payload.email))
            .filter(|row| Md5Encoder::verify(&payload.password, &row.password))
            .map(|row| row.user.clone())
            .ok_or_else(|| ApiError::Validation("用户名或密码错误".to_string()))
    }

    pub async fn register(&self, payload: &ReqRegister) -> ApiResult<ResUser> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|row| row.user.email.eq_ignore_ascii_case(&payload.email))
        {
            return Err(ApiError::Validation("该邮箱已被注册".to_string()));
        }

        let user = ResUser {
            id: Uuid::new_v4().simple().to_string(),
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            avatar: None,
        };
        users.push(UserModel {
            user: user.clone(),
            password: Md5Encoder::encode(&payload.password),
        });
        info!("user {} registered", user.email);

        Ok(user)
    }
}
