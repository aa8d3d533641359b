use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use common::application::ApiConfig;
use common::error::{ApiError, ApiResult};
use common::ApiResponse;

/// 后端接口客户端
///
/// 登录后的 token 保存在共享槽位中, 每个请求自动带上 `Authorization: Bearer <token>`.
/// 克隆出的客户端共用同一个 token.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.client.delete(self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let request = match self.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|err| {
            warn!("Network error - please check your connection: {}", err);
            ApiError::from(err)
        })?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::failure(status, &body));
        }

        serde_json::from_str::<ApiResponse<T>>(&body)?
            .into_data()?
            .ok_or_else(|| ApiError::Error("response has no data".to_string()))
    }

    /// 非 2xx 响应: 优先使用服务端返回的 message
    fn failure(status: StatusCode, body: &str) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => warn!("Unauthorized - please login again"),
            StatusCode::FORBIDDEN => warn!("Forbidden - access denied"),
            StatusCode::NOT_FOUND => debug!("Resource not found"),
            StatusCode::INTERNAL_SERVER_ERROR => warn!("Server error - please try again later"),
            _ => debug!("Request failed with status {}", status),
        }

        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthenticated;
        }

        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .map(|res| res.message)
            .filter(|message| !message.is_empty());

        match message {
            Some(message) if status == StatusCode::NOT_FOUND => ApiError::NotFound(message),
            Some(message) if status.is_client_error() => ApiError::Validation(message),
            Some(message) => ApiError::Error(message),
            None => ApiError::Error(status.to_string()),
        }
    }
}
