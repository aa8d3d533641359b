use serde::{Deserialize, Serialize};

use crate::request::address::AddressType;

/// 服务端收货地址输出, 主键以 `_id` 字段返回
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResAddress {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// 删除结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResMessage {
    pub message: String,
}
