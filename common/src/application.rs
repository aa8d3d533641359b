use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::value::Value;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};

/// 配置模板, 配置文件不存在时复制一份
pub const EXAMPLE_FILE: &str = "application.example.yaml";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    // 服务域名
    pub host: String,
    // 服务端口
    pub port: u16,
    // 日志级别
    pub log_level: String,
    // 客户端请求配置
    pub api: ApiConfig,
    pub jwt: JwtConfig,
    // 预置账号
    pub users: Vec<SeedUser>,
}

impl Application {
    pub async fn init<P: AsRef<Path>>(filename: P) -> ApiResult<Self> {
        let cfg = Application::file_get_content(filename.as_ref()).await?;

        Application::from_value(&cfg)
    }

    pub fn from_yaml(content: &str) -> ApiResult<Self> {
        let cfg = serde_yaml::from_str::<Value>(content)?;

        Application::from_value(&cfg)
    }

    fn from_value(cfg: &Value) -> ApiResult<Self> {
        Ok(Application {
            host: Self::analysis::<String>("host", cfg)?,
            port: Self::analysis::<u16>("port", cfg)?,
            log_level: Self::analysis_or("log_level", cfg, "debug".to_string())?,
            api: Self::analysis_or::<ApiConfig>("api", cfg, ApiConfig::default())?,
            jwt: Self::analysis::<JwtConfig>("jwt", cfg)?,
            users: Self::analysis_or::<Vec<SeedUser>>("users", cfg, Vec::new())?,
        })
    }

    fn analysis<T: DeserializeOwned>(key: &str, value: &Value) -> ApiResult<T> {
        let val = match value.get(key) {
            Some(value) => value,
            None => return Err(ApiError::Error(format!("{} 字段不存在", key))),
        };
        Ok(serde_yaml::from_value::<T>(val.clone())?)
    }

    fn analysis_or<T: DeserializeOwned>(key: &str, value: &Value, default: T) -> ApiResult<T> {
        match value.get(key) {
            Some(val) => Ok(serde_yaml::from_value::<T>(val.clone())?),
            None => Ok(default),
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 读取文件内容, 文件不存在时进行创建
    async fn file_get_content(filename: &Path) -> ApiResult<Value> {
        match tokio::fs::read(filename).await {
            Ok(file_content) => serde_yaml::from_slice::<Value>(file_content.as_slice()).map_err(|e| {
                warn!("请检查 {} 配置信息! err: {}", filename.display(), e);
                ApiError::from(e)
            }),
            Err(_e) => {
                info!("{} 不存在, 正在创建配置文件 ...", filename.display());
                match tokio::fs::copy(EXAMPLE_FILE, filename).await {
                    Ok(_) => {
                        info!("配置文件 {} 创建成功, 请填写配置信息!", filename.display());
                        Err(ApiError::Error("请重新填写配置信息".to_string()))
                    }
                    Err(e) => {
                        warn!("没有找到原始配置文件 {}, err: {}", EXAMPLE_FILE, e);
                        Err(ApiError::from(e))
                    }
                }
            }
        }
    }
}

/// 客户端接口配置
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    // 请求超时(秒)
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001/api".to_string(),
            timeout: 30,
        }
    }
}

/// jwt 签名配置
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    // access_token 有效期(秒)
    pub exp: i64,
    pub iss: String,
}

/// 预置账号, 密码为明文, 载入时转为 md5
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SeedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}
