pub mod admin;
pub mod language;
pub mod security;

pub use admin::AdminUser;
pub use language::CurrentLanguage;
