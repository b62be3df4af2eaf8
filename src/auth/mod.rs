//! Authentication: password hashing, session tokens and the route guard

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService, TOKEN_TTL_SECS};
pub use middleware::{extract_token, require_auth, AuthContext};
pub use password::PasswordHasher;
