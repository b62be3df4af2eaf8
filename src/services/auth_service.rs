//! 认证服务：注册、登录

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    config::SecurityConfig,
    error::AppError,
    models::{auth::TokenResponse, user::*},
    repository::UserStore,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
    security: SecurityConfig,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt_service: Arc<JwtService>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            users,
            jwt_service,
            hasher: PasswordHasher::new(),
            security,
        }
    }

    /// 用户注册，成功后直接签发令牌
    pub async fn signup(&self, req: SignupRequest) -> Result<TokenResponse, AppError> {
        check_credentials_shape(&req)?;
        PasswordHasher::validate_password_policy(&req.password, &self.security)?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            tracing::info!(email = %req.email, "Signup rejected: email already registered");
            return Err(AppError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let user = self
            .users
            .create(&NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        let token = self.jwt_service.issue(user.id)?;
        tracing::info!(user_id = user.id, "User signed up");

        Ok(TokenResponse {
            msg: "user logged in susscessfully".to_string(),
            token,
        })
    }

    /// 用户登录
    ///
    /// 先按邮箱查找，再单独校验密码哈希；邮箱不存在与密码错误返回同一错误。
    pub async fn signin(&self, req: SigninRequest) -> Result<TokenResponse, AppError> {
        check_credentials_shape(&req)?;
        PasswordHasher::validate_password_policy(&req.password, &self.security)?;

        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Signin rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.issue(user.id)?;
        tracing::info!(user_id = user.id, "User signed in");

        Ok(TokenResponse {
            msg: "user signed in susscessfully".to_string(),
            token,
        })
    }
}

fn check_credentials_shape<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate().map_err(|e| {
        tracing::debug!(error = %e, "Credentials failed validation");
        AppError::validation("Invalid Credentials")
    })
}
