use crate::domain::{BoundingBox, NewRecycler, NewUser, Recycler, User};
use crate::error::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    /// Lookup by normalized (trimmed, lowercased) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Fails with `AppError::Conflict` when the email is already taken.
    async fn create(&self, user: &NewUser) -> AppResult<User>;
}

#[async_trait]
pub trait RecyclerRepository: Send + Sync {
    /// All facilities ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Recycler>>;
    async fn find_verified(&self) -> AppResult<Vec<Recycler>>;
    /// Rating descending, ties by id.
    async fn find_all_by_rating_desc(&self) -> AppResult<Vec<Recycler>>;
    /// Candidates inside `bounds`, ordered by id; every row when `bounds` is `None`.
    async fn find_within_bounds(&self, bounds: Option<&BoundingBox>) -> AppResult<Vec<Recycler>> {
        let recyclers = self.find_all().await?;
        Ok(match bounds {
            Some(bounds) => recyclers
                .into_iter()
                .filter(|recycler| bounds.contains(&recycler.location()))
                .collect(),
            None => recyclers,
        })
    }
    async fn create(&self, recycler: &NewRecycler) -> AppResult<Recycler>;
}
