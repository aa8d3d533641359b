use std::sync::Arc;

use axum::response::IntoResponse;
use axum::{Extension, Json};
use tracing::info;
use validator::Validate;

use common::error::ApiResult;
use common::request::auth::{ReqLogin, ReqRegister};
use common::response::user::{ResLogin, ResUser};
use common::ApiResponse;

use crate::AppState;

pub struct AuthController;

impl AuthController {
    /// 用户登录
    pub async fn login(
        Extension(state): Extension<Arc<AppState>>,
        Json(payload): Json<ReqLogin>,
    ) -> impl IntoResponse {
        ApiResponse::response(Self::sign_in(&state, payload).await)
    }

    async fn sign_in(state: &AppState, payload: ReqLogin) -> ApiResult<ResLogin> {
        payload.validate()?;

        let user = state.users.login(&payload).await?;
        let mut claims = state.jwt.new_claims(&user);
        let token = state.jwt.access_token(&mut claims)?;
        info!("user {} signed in", user.email);

        Ok(ResLogin { token, user })
    }

    /// 用户注册, 不自动登录
    pub async fn register(
        Extension(state): Extension<Arc<AppState>>,
        Json(payload): Json<ReqRegister>,
    ) -> impl IntoResponse {
        ApiResponse::response(Self::sign_up(&state, payload).await)
    }

    async fn sign_up(state: &AppState, payload: ReqRegister) -> ApiResult<ResUser> {
        payload.validate()?;

        state.users.register(&payload).await
    }
}
