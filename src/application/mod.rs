mod auth_service;
pub mod mapper;
pub mod recycler_import;
mod recycler_service;

pub use auth_service::{AuthService, MISSING_CREDENTIALS_MESSAGE};
pub use recycler_import::{check_import, import_recyclers, parse_import_document, ImportSummary};
pub use recycler_service::RecyclerService;
