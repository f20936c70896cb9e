mod recycler_repository;
mod traits;
mod user_repository;

pub use recycler_repository::RecyclerRepositoryImpl;
pub use traits::{RecyclerRepository, UserRepository};
pub use user_repository::UserRepositoryImpl;
