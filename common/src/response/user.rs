use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct ResUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// 登录成功返回 token 和用户信息
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResLogin {
    pub token: String,
    pub user: ResUser,
}
