//! 店铺后端: 登录注册和收货地址接口
//!
//! 数据保存在内存中, 账号来自配置文件的 `users` 段.

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use common::application::Application;
use common::jwt::JWT;

use crate::models::address::AddressStore;
use crate::models::user::UserStore;

pub mod controller;
pub mod middleware;
pub mod models;
pub mod router;

pub struct AppState {
    pub jwt: JWT,
    pub users: UserStore,
    pub addresses: AddressStore,
}

impl AppState {
    pub fn new(cfg: &Application) -> Self {
        Self {
            jwt: JWT::from(&cfg.jwt),
            users: UserStore::new(&cfg.users),
            addresses: AddressStore::new(),
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    router::routers().layer(ServiceBuilder::new().layer(Extension(state)))
}
