pub mod cookie;
pub mod markdown;
pub mod session;
pub mod text;

pub use markdown::{render_code_block, render_markdown};
pub use text::{slugify, truncate_chars};
