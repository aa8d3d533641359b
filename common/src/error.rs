use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::io::Error;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// 返回资源类型
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 系统定义错误
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ApiError {
    /// 未分类错误: 数据解析失败, 接口契约不符等
    Error(String),
    /// 网络不可达或请求超时
    Network(String),
    /// 参数校验失败(本地或服务端返回)
    Validation(String),
    /// 资源不存在
    NotFound(String),
    /// 用户未登录
    Unauthenticated,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Network(_) => StatusCode::BAD_GATEWAY,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Error(err) => write!(f, "{}", err),
            ApiError::Network(err) => write!(f, "network error: {}", err),
            ApiError::Validation(err) => write!(f, "{}", err),
            ApiError::NotFound(err) => write!(f, "{}", err),
            ApiError::Unauthenticated => write!(f, "您还未登录系统"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<tokio::io::Error> for ApiError {
    fn from(_e: Error) -> Self {
        ApiError::Error(_e.to_string())
    }
}

/// 字段校验错误, 按字段名排序保证输出稳定
pub fn format_errors(errors: ValidationErrors) -> Vec<HashMap<String, String>> {
    let mut fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, err)| {
            let message = err
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join(",");

            (field.to_owned(), message)
        })
        .collect::<Vec<(String, String)>>();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .map(|(field, message)| HashMap::from([(field, message)]))
        .collect::<Vec<HashMap<String, String>>>()
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        let message = format_errors(value)
            .into_iter()
            .flat_map(|item| item.into_iter())
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<String>>()
            .join("; ");

        ApiError::Validation(message)
    }
}

impl From<&str> for ApiError {
    fn from(_e: &str) -> Self {
        ApiError::Error(_e.to_string())
    }
}

impl From<String> for ApiError {
    fn from(_e: String) -> Self {
        ApiError::Error(_e)
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        ApiError::Error(value.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Error(value.to_string())
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(value: serde_yaml::Error) -> Self {
        ApiError::Error(value.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return ApiError::Error(value.to_string());
        }

        ApiError::Network(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::fail_msg_code(status.as_u16(), self.to_string()).response_body(status)
    }
}

#[cfg(test)]
mod test {
    use std::borrow::Cow;

    use validator::ValidationError;

    use super::*;

    #[test]
    fn validation_errors_are_joined_by_field() {
        let mut errors = ValidationErrors::new();
        let mut city = ValidationError::new("required");
        city.message = Some(Cow::from("城市不能为空"));
        let mut phone = ValidationError::new("required");
        phone.message = Some(Cow::from("手机号不能为空"));
        errors.add("phone", phone);
        errors.add("city", city);

        assert_eq!(
            ApiError::from(errors),
            ApiError::Validation("city: 城市不能为空; phone: 手机号不能为空".to_string())
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert!(ApiError::Network("down".to_string()).is_network());
    }
}
