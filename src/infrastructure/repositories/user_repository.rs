use super::traits::UserRepository;
use crate::domain::{NewUser, User};
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str = "user_id AS id, user_name, email, phone_number, address_text, \
    external_uid, password_hash, loyalty_points, is_verified, is_premium, created_at, updated_at";

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (user_name, email, phone_number, address_text, external_uid, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.address_text)
        .bind(&user.external_uid)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }
}
