use serde::{Deserialize, Serialize};
use serde_json::Value;

use common::error::{ApiError, ApiResult};
use common::request::address::{AddressType, ReqAddressInfo};

/// 后端原始记录, 未经过主键归一化
pub type RawAddress = Value;

/// 后端使用的主键字段名
pub const BACKEND_ID: &str = "_id";

/// 客户端统一使用的收货地址, 主键固定为 `id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(rename = "type", default)]
    pub address_type: AddressType,
    #[serde(default)]
    pub is_default: bool,
}

impl Address {
    /// 编辑表单的初始值
    pub fn to_payload(&self) -> ReqAddressInfo {
        ReqAddressInfo {
            full_name: Some(self.full_name.clone()),
            phone: Some(self.phone.clone()),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            pincode: Some(self.pincode.clone()),
            landmark: self.landmark.clone(),
            address_type: Some(self.address_type),
            is_default: Some(self.is_default),
        }
    }
}

fn id_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(id)) if !id.trim().is_empty() => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

/// 主键归一化: 优先取 `_id`, 其次 `id`, 两者都没有视为接口契约错误
pub fn normalize(mut raw: RawAddress) -> ApiResult<Address> {
    let record = raw
        .as_object_mut()
        .ok_or_else(|| ApiError::Error("address record must be a json object".to_string()))?;

    let id = id_value(record.get(BACKEND_ID))
        .or_else(|| id_value(record.get("id")))
        .ok_or_else(|| ApiError::Error("address record has neither `_id` nor `id`".to_string()))?;
    record.remove(BACKEND_ID);
    record.insert("id".to_string(), Value::String(id));

    Ok(serde_json::from_value::<Address>(raw)?)
}

pub fn normalize_all(raw: Vec<RawAddress>) -> ApiResult<Vec<Address>> {
    raw.into_iter().map(normalize).collect()
}
