use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::IsEmpty;

/// 地址分类标签, 不影响选择逻辑
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressType {
    #[default]
    Home,
    Work,
    Other,
}

/// 创建/修改收货地址参数, 未填写的字段不会序列化
#[derive(Debug, Clone, Default, PartialEq, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReqAddressInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "收货人不能超过100字"))]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "联系电话不能超过20字"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "详细地址不能超过255字"))]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "城市不能超过100字"))]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "省份不能超过100字"))]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 12, message = "邮编不能超过12字"))]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl ReqAddressInfo {
    /// 设为默认地址, 只携带 isDefault 字段
    pub fn make_default() -> Self {
        Self {
            is_default: Some(true),
            ..Default::default()
        }
    }

    /// 新建地址时所有必填字段都必须存在
    pub fn validate_for_create(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(e) => e,
        };

        let required = [
            ("full_name", &self.full_name, "收货人不能为空"),
            ("phone", &self.phone, "联系电话不能为空"),
            ("address", &self.address, "详细地址不能为空"),
            ("city", &self.city, "城市不能为空"),
            ("state", &self.state, "省份不能为空"),
            ("pincode", &self.pincode, "邮编不能为空"),
        ];
        for (field, value, message) in required {
            if IsEmpty::is_empty(value) {
                let mut err = ValidationError::new("required");
                err.message = Some(Cow::from(message));
                errors.add(field, err);
            }
        }

        if errors.errors().is_empty() {
            return Ok(());
        }

        Err(errors)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn complete() -> ReqAddressInfo {
        ReqAddressInfo {
            full_name: Some("Asha Rao".to_string()),
            phone: Some("9876543210".to_string()),
            address: Some("12 MG Road".to_string()),
            city: Some("Pune".to_string()),
            state: Some("MH".to_string()),
            pincode: Some("411001".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn make_default_only_serializes_flag() {
        let body = serde_json::to_value(ReqAddressInfo::make_default()).unwrap();
        assert_eq!(body, serde_json::json!({ "isDefault": true }));
    }

    #[test]
    fn create_requires_every_field() {
        assert!(complete().validate_for_create().is_ok());

        let mut info = complete();
        info.city = Some("  ".to_string());
        info.pincode = None;
        let errors = info.validate_for_create().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("city"));
        assert!(fields.contains_key("pincode"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn type_field_uses_wire_name() {
        let info: ReqAddressInfo =
            serde_json::from_str(r#"{"type":"Work","isDefault":false}"#).unwrap();
        assert_eq!(info.address_type, Some(AddressType::Work));
        assert_eq!(info.is_default, Some(false));
    }
}
