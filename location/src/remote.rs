use async_trait::async_trait;

use common::error::ApiResult;
use common::request::address::ReqAddressInfo;
use common::response::address::ResMessage;

use crate::address::RawAddress;
use crate::api::ApiClient;
use crate::storage::AddressStorage;

/// 通过 REST 接口访问收货地址
#[derive(Clone, Debug)]
pub struct HttpAddressStorage {
    api: ApiClient,
}

impl HttpAddressStorage {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AddressStorage for HttpAddressStorage {
    async fn list(&self) -> ApiResult<Vec<RawAddress>> {
        self.api.get("addresses").await
    }

    async fn create(&self, info: &ReqAddressInfo) -> ApiResult<RawAddress> {
        self.api.post("addresses", info).await
    }

    async fn update(&self, id: &str, info: &ReqAddressInfo) -> ApiResult<RawAddress> {
        self.api.put(&format!("addresses/{}", id), info).await
    }

    async fn delete(&self, id: &str) -> ApiResult<String> {
        let res: ResMessage = self.api.delete(&format!("addresses/{}", id)).await?;
        Ok(res.message)
    }
}
