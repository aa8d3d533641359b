use axum::extract::FromRequest;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json, RequestExt};

use crate::error::ApiError;
use crate::jwt::Claims;

pub mod address;
pub mod auth;

/// 请求体数据和当前登录用户
#[derive(Debug)]
pub struct AppExtractor<T> {
    pub inner: T,
    pub claims: Claims,
}

#[async_trait]
impl<S, B, T> FromRequest<S, B> for AppExtractor<T>
where
    B: Send + 'static,
    S: Send + Sync,
    T: 'static,
    Json<T>: FromRequest<(), B>,
{
    type Rejection = Response;

    async fn from_request(req: Request<B>, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = match req.extensions().get::<Claims>() {
            Some(value) => value.clone(),
            None => return Err(ApiError::Unauthenticated.into_response()),
        };

        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Err(ApiError::Validation("请使用 application/json 提交数据".to_string())
                .into_response());
        }

        let Json(inner) = req.extract::<Json<T>, _>().await.map_err(|_err| {
            ApiError::Validation("json 参数解析错误".to_string()).into_response()
        })?;

        Ok(Self { inner, claims })
    }
}
