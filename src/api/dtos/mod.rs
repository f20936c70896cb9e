pub mod auth_dto;
pub mod common;
pub mod recycler_dto;
pub mod user_dto;

pub use auth_dto::*;
pub use common::*;
pub use recycler_dto::*;
pub use user_dto::*;
