use std::sync::Arc;

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Extension;
use tracing::info;

use common::jwt::Claims;
use common::request::address::ReqAddressInfo;
use common::request::AppExtractor;
use common::response::address::ResMessage;
use common::ApiResponse;

use crate::AppState;

pub struct AddressController;

impl AddressController {
    /// 当前用户的收货地址列表
    pub async fn list_address(
        Extension(state): Extension<Arc<AppState>>,
        Extension(claims): Extension<Claims>,
    ) -> impl IntoResponse {
        ApiResponse::response(Ok(state.addresses.list(&claims.id).await))
    }

    /// 新建收货地址
    pub async fn create_address(
        Extension(state): Extension<Arc<AppState>>,
        params: AppExtractor<ReqAddressInfo>,
    ) -> impl IntoResponse {
        let result = state.addresses.create(&params.claims.id, &params.inner).await;
        if let Ok(address) = &result {
            info!("user {} created address {}", params.claims.id, address.id);
        }

        ApiResponse::response(result)
    }

    /// 修改收货地址, 也用于设置默认地址
    pub async fn update_address(
        Extension(state): Extension<Arc<AppState>>,
        Path(id): Path<String>,
        params: AppExtractor<ReqAddressInfo>,
    ) -> impl IntoResponse {
        ApiResponse::response(
            state
                .addresses
                .update(&params.claims.id, &id, &params.inner)
                .await,
        )
    }

    /// 删除收货地址
    pub async fn delete_address(
        Extension(state): Extension<Arc<AppState>>,
        Extension(claims): Extension<Claims>,
        Path(id): Path<String>,
    ) -> impl IntoResponse {
        let result = state.addresses.delete(&claims.id, &id).await.map(|_| {
            info!("user {} deleted address {}", claims.id, id);
            ResMessage {
                message: "Address deleted successfully".to_string(),
            }
        });

        ApiResponse::response(result)
    }
}
