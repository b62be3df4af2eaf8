//! 领域模型

pub mod auth;
pub mod post;
pub mod user;

pub use auth::TokenResponse;
pub use post::{AuthorSummary, Post, PostCreatedResponse, PostInput, PostWithAuthor};
pub use user::{NewUser, SigninRequest, SignupRequest, User, UserResponse};
