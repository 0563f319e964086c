pub mod article;
pub mod category;
pub mod forms;
pub mod inbox;
pub mod language;
pub mod pages;
pub mod seo;
pub mod settings;
pub mod upload;
pub mod views;
