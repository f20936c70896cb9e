use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::api::dtos::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
use crate::application::mapper::map_user_response;
use crate::config::AuthConfig;
use crate::domain::user::{local_external_uid, normalize_email};
use crate::domain::{DomainError, NewUser, User};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::UserRepository;
use crate::utils::hash::{hash_password, verify_password};
use crate::utils::jwt::create_access_token;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required";

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let request = request.normalized();
        request.validate()?;

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(DomainError::DuplicateEmail.into());
        }

        let new_user = NewUser {
            password_hash: Some(hash_password(&request.password)?),
            user_name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            address_text: request.address,
            external_uid: local_external_uid(),
        };

        let user = match self.user_repo.create(&new_user).await {
            Ok(user) => user,
            Err(AppError::Conflict(_)) => return Err(DomainError::DuplicateEmail.into()),
            Err(error) => return Err(error),
        };

        info!(user_id = user.id, "user signed up");
        self.issue(&user)
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        let (email, password) = request
            .credentials()
            .ok_or_else(|| AppError::BadRequest(MISSING_CREDENTIALS_MESSAGE.to_string()))?;
        let email = normalize_email(email);

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => self.check_password(user, password)?,
            None if self.config.auto_provision_on_login => {
                self.provision_account(&email, password).await?
            }
            None => return Err(AppError::Unauthorized),
        };

        self.issue(&user)
    }

    /// Creates the account for a first login. When a concurrent request
    /// inserted the same email first, that account is returned instead,
    /// provided the password matches it.
    pub async fn provision_account(&self, email: &str, password: &str) -> AppResult<User> {
        let new_user = NewUser::provisioned(email, Some(hash_password(password)?));

        match self.user_repo.create(&new_user).await {
            Ok(user) => {
                info!(user_id = user.id, "account provisioned on first login");
                Ok(user)
            }
            Err(AppError::Conflict(_)) => {
                let existing = self
                    .user_repo
                    .find_by_email(&new_user.email)
                    .await?
                    .ok_or(AppError::Unauthorized)?;
                self.check_password(existing, password)
            }
            Err(error) => Err(error),
        }
    }

    pub async fn profile(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(map_user_response(&user))
    }

    /// Accounts without a stored credential cannot sign in with a password.
    fn check_password(&self, user: User, password: &str) -> AppResult<User> {
        let Some(hash) = user.password_hash.as_deref() else {
            warn!(user_id = user.id, "login refused: account has no password credential");
            return Err(AppError::Unauthorized);
        };

        if verify_password(password, hash)? {
            Ok(user)
        } else {
            warn!(user_id = user.id, "password mismatch");
            Err(AppError::Unauthorized)
        }
    }

    fn issue(&self, user: &User) -> AppResult<AuthResponse> {
        Ok(AuthResponse {
            token: create_access_token(user.id, &self.config)?,
            user: map_user_response(user),
        })
    }
}
