use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode as jwt_decode, encode as jwt_encode, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::JwtConfig;
use crate::error::{ApiError, ApiResult};
use crate::response::user::ResUser;

const ACCESS_TOKEN: &str = "access_token";

pub struct JWT {
    pub secret: String,
    pub exp: i64,
    pub iss: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Claims {
    // 用户id
    pub id: String,
    // 昵称
    pub name: String,
    // 账号
    pub email: String,
    // 过期时间
    pub exp: i64,
    // 签发机构
    iss: String,
    // token的类型
    token_type: String,
}

impl Claims {
    pub fn token_type(&self) -> &str {
        &self.token_type
    }
}

impl From<&JwtConfig> for JWT {
    fn from(cfg: &JwtConfig) -> Self {
        Self::new(cfg.secret.clone(), cfg.exp, cfg.iss.clone())
    }
}

impl JWT {
    pub fn new(secret: String, exp: i64, iss: String) -> Self {
        Self { secret, exp, iss }
    }

    pub fn new_claims(&self, user: &ResUser) -> Claims {
        Claims {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            iss: self.iss.clone(),
            exp: self.calc_claim_exp(),
            token_type: "".to_string(),
        }
    }

    fn calc_claim_exp(&self) -> i64 {
        (Utc::now() + Duration::seconds(self.exp)).timestamp()
    }

    fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// 获取签名token
    pub fn token(&self, claims: &Claims) -> ApiResult<String> {
        jwt_encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )
        .map_err(ApiError::from)
    }

    /// access_token 有效期由配置决定
    pub fn access_token(&self, claims: &mut Claims) -> ApiResult<String> {
        claims.token_type = ACCESS_TOKEN.to_string();
        claims.exp = self.calc_claim_exp();

        self.token(claims)
    }

    /// 验证token, 并返回claims
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let mut validate = Validation::new(jsonwebtoken::Algorithm::HS256);
        validate.set_issuer(&[self.iss.clone()]);

        let claims = jwt_decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_bytes()),
            &validate,
        )
        .map_err(|err| {
            debug!("jwt verify err: {}", err);
            ApiError::Unauthenticated
        })?
        .claims;

        if claims.token_type() != ACCESS_TOKEN {
            return Err(ApiError::Unauthenticated);
        }

        Ok(claims)
    }
}
