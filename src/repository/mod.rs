//! 存储层
//! 外部关系型数据库的访问接口及其 PostgreSQL 实现

pub mod post_repo;
pub mod user_repo;

pub use post_repo::{PostRepository, PostStore};
pub use user_repo::{HealthStatus, UserRepository, UserStore};
