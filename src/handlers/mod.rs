//! HTTP 处理器

pub mod blog;
pub mod health;
pub mod user;
