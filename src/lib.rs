pub mod config;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use i18n::Language;
pub use middleware::{AdminUser, CurrentLanguage};
pub use response::{ApiResponse, FormResponse, PaginatedResponse, PaginationQuery};
