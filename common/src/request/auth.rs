use serde::{Deserialize, Serialize};
use validator::Validate;

/// 用户登录
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReqLogin {
    #[validate(email(message = "邮箱格式错误"))]
    pub email: String,
    #[validate(length(min = 6, max = 64, message = "密码必须在6-64字之间"))]
    pub password: String,
}

/// 用户注册
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReqRegister {
    #[validate(length(min = 2, max = 50, message = "名称必须在2-50字之间"))]
    pub name: String,
    #[validate(email(message = "邮箱格式错误"))]
    pub email: String,
    #[validate(length(min = 10, max = 15, message = "手机号格式错误"))]
    pub phone: String,
    #[validate(length(min = 6, max = 64, message = "密码必须在6-64字之间"))]
    pub password: String,
}
