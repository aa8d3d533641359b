use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::request::address::ReqAddressInfo;
use crate::response::address::ResAddress;

/// 单个用户的收货地址簿
///
/// 设置 `isDefault: true` 时会清除其他地址的默认标记, 删除默认地址不会自动补选
#[derive(Debug, Default, Clone)]
pub struct AddressBook {
    records: Vec<ResAddress>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接载入已有数据, 不做默认地址互斥检查
    pub fn from_records(records: Vec<ResAddress>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ResAddress] {
        &self.records
    }

    pub fn list(&self) -> Vec<ResAddress> {
        self.records.clone()
    }

    /// 新建收货地址
    pub fn create(&mut self, info: &ReqAddressInfo) -> ApiResult<ResAddress> {
        info.validate_for_create()?;

        let now = Utc::now().to_rfc3339();
        let mut record = ResAddress {
            id: Uuid::new_v4().simple().to_string(),
            created_at: now.clone(),
            updated_at: now,
            ..Default::default()
        };
        record.apply(info);

        if record.is_default {
            self.clear_default_except(&record.id);
        }
        self.records.push(record.clone());

        Ok(record)
    }

    /// 修改收货地址, 只覆盖传入的字段
    pub fn update(&mut self, id: &str, info: &ReqAddressInfo) -> ApiResult<ResAddress> {
        validator::Validate::validate(info)?;

        let record = self
            .records
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("收货地址不存在: {}", id)))?;
        record.apply(info);
        record.updated_at = Utc::now().to_rfc3339();
        let record = record.clone();

        if record.is_default {
            self.clear_default_except(&record.id);
        }

        Ok(record)
    }

    pub fn delete(&mut self, id: &str) -> ApiResult<ResAddress> {
        let index = self
            .records
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("收货地址不存在: {}", id)))?;

        Ok(self.records.remove(index))
    }

    fn clear_default_except(&mut self, id: &str) {
        for item in self.records.iter_mut().filter(|item| item.id != id) {
            item.is_default = false;
        }
    }
}

impl ResAddress {
    /// 将请求参数中存在的字段写入记录
    pub fn apply(&mut self, info: &ReqAddressInfo) {
        if let Some(full_name) = &info.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(phone) = &info.phone {
            self.phone = phone.clone();
        }
        if let Some(address) = &info.address {
            self.address = address.clone();
        }
        if let Some(city) = &info.city {
            self.city = city.clone();
        }
        if let Some(state) = &info.state {
            self.state = state.clone();
        }
        if let Some(pincode) = &info.pincode {
            self.pincode = pincode.clone();
        }
        if info.landmark.is_some() {
            self.landmark = info.landmark.clone();
        }
        if let Some(address_type) = info.address_type {
            self.address_type = address_type;
        }
        if let Some(is_default) = info.is_default {
            self.is_default = is_default;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::request::address::AddressType;

    fn info(name: &str, is_default: bool) -> ReqAddressInfo {
        ReqAddressInfo {
            full_name: Some(name.to_string()),
            phone: Some("9876543210".to_string()),
            address: Some("12 MG Road".to_string()),
            city: Some("Pune".to_string()),
            state: Some("MH".to_string()),
            pincode: Some("411001".to_string()),
            address_type: Some(AddressType::Work),
            is_default: Some(is_default),
            ..Default::default()
        }
    }

    fn defaults(book: &AddressBook) -> Vec<String> {
        book.records()
            .iter()
            .filter(|item| item.is_default)
            .map(|item| item.full_name.clone())
            .collect()
    }

    #[test]
    fn new_default_is_exclusive() {
        let mut book = AddressBook::new();
        book.create(&info("a", true)).unwrap();
        let b = book.create(&info("b", false)).unwrap();
        assert_eq!(defaults(&book), vec!["a"]);

        book.update(&b.id, &ReqAddressInfo::make_default()).unwrap();
        assert_eq!(defaults(&book), vec!["b"]);

        book.create(&info("c", true)).unwrap();
        assert_eq!(defaults(&book), vec!["c"]);
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut book = AddressBook::new();
        let a = book.create(&info("a", false)).unwrap();
        let patch = ReqAddressInfo {
            city: Some("Mumbai".to_string()),
            ..Default::default()
        };

        let updated = book.update(&a.id, &patch).unwrap();
        assert_eq!(updated.city, "Mumbai");
        assert_eq!(updated.full_name, "a");
        assert_eq!(updated.address_type, AddressType::Work);
        assert_eq!(updated.id, a.id);
    }

    #[test]
    fn unknown_id_and_incomplete_create_fail() {
        let mut book = AddressBook::new();
        assert!(matches!(
            book.update("missing", &ReqAddressInfo::make_default()),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(book.delete("missing"), Err(ApiError::NotFound(_))));

        let mut incomplete = info("a", false);
        incomplete.phone = None;
        assert!(matches!(book.create(&incomplete), Err(ApiError::Validation(_))));
        assert!(book.records().is_empty());
    }

    #[test]
    fn deleting_default_does_not_promote() {
        let mut book = AddressBook::new();
        let a = book.create(&info("a", true)).unwrap();
        book.create(&info("b", false)).unwrap();

        book.delete(&a.id).unwrap();
        assert!(defaults(&book).is_empty());
        assert_eq!(book.list().len(), 1);
    }
}
