use std::sync::Arc;

use axum::headers::authorization::Bearer;
use axum::headers::Authorization;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, TypedHeader};
use tracing::debug;

use common::error::{ApiError, ApiResult};

use crate::AppState;

/// 登录守卫, 校验通过后把 claims 带到下游
pub async fn auth_guard<B>(
    Extension(state): Extension<Arc<AppState>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<B>,
    next: Next<B>,
) -> ApiResult<Response> {
    let Some(TypedHeader(auth)) = auth else {
        debug!("missing bearer token: {}", req.uri().path());
        return Err(ApiError::Unauthenticated);
    };

    let claims = state.jwt.verify(auth.token())?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
