use std::collections::HashMap;

use tokio::sync::RwLock;

use common::book::AddressBook;
use common::error::{ApiError, ApiResult};
use common::request::address::ReqAddressInfo;
use common::response::address::ResAddress;

/// 按用户隔离的收货地址
#[derive(Debug, Default)]
pub struct AddressStore {
    books: RwLock<HashMap<String, AddressBook>>,
}

impl AddressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self, user_id: &str) -> Vec<ResAddress> {
        self.books
            .read()
            .await
            .get(user_id)
            .map(AddressBook::list)
            .unwrap_or_default()
    }

    pub async fn create(&self, user_id: &str, info: &ReqAddressInfo) -> ApiResult<ResAddress> {
        self.books
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .create(info)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        info: &ReqAddressInfo,
    ) -> ApiResult<ResAddress> {
        self.books
            .write()
            .await
            .get_mut(user_id)
            .ok_or_else(|| not_found(id))?
            .update(id, info)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> ApiResult<ResAddress> {
        self.books
            .write()
            .await
            .get_mut(user_id)
            .ok_or_else(|| not_found(id))?
            .delete(id)
    }

    #[cfg(test)]
    async fn has_book(&self, user_id: &str) -> bool {
        self.books.read().await.contains_key(user_id)
    }
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("收货地址不存在: {}", id))
}

#[cfg(test)]
mod test {
    use super::*;

    fn info() -> ReqAddressInfo {
        ReqAddressInfo {
            full_name: Some("Asha".to_string()),
            phone: Some("9876543210".to_string()),
            address: Some("12 MG Road".to_string()),
            city: Some("Pune".to_string()),
            state: Some("MH".to_string()),
            pincode: Some("411001".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn books_are_isolated_per_user() {
        let store = AddressStore::new();
        let created = store.create("1", &info()).await.unwrap();

        assert_eq!(store.list("1").await, vec![created.clone()]);
        assert!(store.list("2").await.is_empty());
        assert!(matches!(
            store.delete("2", &created.id).await,
            Err(ApiError::NotFound(_))
        ));
        assert_eq!(store.delete("1", &created.id).await.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn unknown_user_gets_not_found_without_a_book() {
        let store = AddressStore::new();

        assert!(matches!(
            store.update("9", "x", &info()).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("9", "x").await,
            Err(ApiError::NotFound(_))
        ));
        assert!(!store.has_book("9").await);
    }
}
