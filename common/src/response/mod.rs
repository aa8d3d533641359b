use std::fmt::{Display, Formatter};

use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

pub mod address;
pub mod user;

/// 全局通用成功编码
pub const SUCCESS: u16 = 0;
/// 全局通用错误编码
pub const FAIL: u16 = 10000;

/// 接口统一返回结构, 客户端和服务端共用
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> Display for ApiResponse<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(body) => write!(f, "{}", body),
            Err(err) => {
                tracing::error!("ApiResponse serialize err: {}", err);
                Ok(())
            }
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn fail_msg(message: String) -> Self {
        Self::fail_msg_code(FAIL, message)
    }

    pub fn fail_msg_code(code: u16, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }

    /// 客户端解包: 业务编码非成功时返回服务端给出的错误信息
    pub fn into_data(self) -> ApiResult<Option<T>> {
        if !self.is_success() {
            if self.code == StatusCode::UNAUTHORIZED.as_u16() {
                return Err(ApiError::Unauthenticated);
            }
            if self.code == StatusCode::NOT_FOUND.as_u16() {
                return Err(ApiError::NotFound(self.message));
            }
            return Err(ApiError::Validation(self.message));
        }

        Ok(self.data)
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn response(result: ApiResult<T>) -> Response {
        match result {
            Ok(data) => Self::success(data).json(),
            Err(err) => err.into_response(),
        }
    }

    pub fn json(&self) -> Response {
        self.response_body(StatusCode::OK)
    }

    pub fn response_body(&self, status: StatusCode) -> Response {
        (
            status,
            [
                (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (CONTENT_TYPE, "application/json; charset=UTF-8"),
                (CACHE_CONTROL, "no-cache"),
            ],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn failed_envelope_maps_to_error() {
        let res = ApiResponse::<i32>::fail_msg("请填写完整的收货地址".to_string());
        assert_eq!(
            res.into_data(),
            Err(ApiError::Validation("请填写完整的收货地址".to_string()))
        );

        let res = ApiResponse::<i32>::fail_msg_code(401, "token expired".to_string());
        assert_eq!(res.into_data(), Err(ApiError::Unauthenticated));
    }

    #[test]
    fn success_envelope_round_trips() {
        let body = ApiResponse::success(vec![1, 2]).to_string();
        let res: ApiResponse<Vec<i32>> = serde_json::from_str(&body).unwrap();
        assert!(res.is_success());
        assert_eq!(res.into_data(), Ok(Some(vec![1, 2])));
    }
}
