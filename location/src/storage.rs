use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use common::book::AddressBook;
use common::error::{ApiError, ApiResult};
use common::request::address::ReqAddressInfo;
use common::response::address::ResAddress;

use crate::address::RawAddress;

/// 收货地址存储接口, 返回未归一化的原始记录
#[async_trait]
pub trait AddressStorage: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<RawAddress>>;

    async fn create(&self, info: &ReqAddressInfo) -> ApiResult<RawAddress>;

    /// 也用于设置默认地址: `{ isDefault: true }`
    async fn update(&self, id: &str, info: &ReqAddressInfo) -> ApiResult<RawAddress>;

    /// 返回服务端的确认信息
    async fn delete(&self, id: &str) -> ApiResult<String>;
}

/// 本地模拟数据, 行为与服务端地址簿一致
#[derive(Debug, Default)]
pub struct MemoryAddressStorage {
    book: Mutex<AddressBook>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryAddressStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ResAddress>) -> Self {
        Self {
            book: Mutex::new(AddressBook::from_records(records)),
            ..Default::default()
        }
    }

    /// 已发起的请求次数(包括失败的)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 模拟断网, 之后所有请求返回网络错误
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// 模拟其他端修改了数据
    pub async fn replace(&self, records: Vec<ResAddress>) {
        *self.book.lock().await = AddressBook::from_records(records);
    }

    pub async fn records(&self) -> Vec<ResAddress> {
        self.book.lock().await.list()
    }

    fn enter(&self, op: &str) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            debug!("memory storage offline, rejecting {}", op);
            return Err(ApiError::Network("memory storage offline".to_string()));
        }

        Ok(())
    }
}

fn to_raw(record: &ResAddress) -> ApiResult<RawAddress> {
    Ok(serde_json::to_value(record)?)
}

#[async_trait]
impl AddressStorage for MemoryAddressStorage {
    async fn list(&self) -> ApiResult<Vec<RawAddress>> {
        self.enter("list")?;
        self.book.lock().await.records().iter().map(to_raw).collect()
    }

    async fn create(&self, info: &ReqAddressInfo) -> ApiResult<RawAddress> {
        self.enter("create")?;
        to_raw(&self.book.lock().await.create(info)?)
    }

    async fn update(&self, id: &str, info: &ReqAddressInfo) -> ApiResult<RawAddress> {
        self.enter("update")?;
        to_raw(&self.book.lock().await.update(id, info)?)
    }

    async fn delete(&self, id: &str) -> ApiResult<String> {
        self.enter("delete")?;
        self.book.lock().await.delete(id)?;
        Ok("Address deleted successfully".to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::address::normalize;

    fn info(name: &str) -> ReqAddressInfo {
        ReqAddressInfo {
            full_name: Some(name.to_string()),
            phone: Some("9876543210".to_string()),
            address: Some("12 MG Road".to_string()),
            city: Some("Pune".to_string()),
            state: Some("MH".to_string()),
            pincode: Some("411001".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn records_use_backend_id_key() {
        let storage = MemoryAddressStorage::new();
        let created = storage.create(&info("Asha")).await.unwrap();
        assert!(created.get("_id").is_some());
        assert!(created.get("id").is_none());

        let address = normalize(created).unwrap();
        let listed = storage.list().await.unwrap();
        assert_eq!(normalize(listed[0].clone()).unwrap(), address);
        assert_eq!(storage.calls(), 2);
    }

    #[tokio::test]
    async fn offline_rejects_and_counts() {
        let storage = MemoryAddressStorage::new();
        storage.set_offline(true);
        assert!(matches!(storage.list().await, Err(ApiError::Network(_))));
        assert!(storage.delete("x").await.unwrap_err().is_network());
        assert_eq!(storage.calls(), 2);

        storage.set_offline(false);
        assert!(matches!(storage.delete("x").await, Err(ApiError::NotFound(_))));
    }
}
