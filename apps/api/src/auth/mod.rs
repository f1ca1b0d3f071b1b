// Authentication helpers: JWT tokens and bcrypt password hashes

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtSettings};
pub use password::{hash_password, verify_password, PasswordError};
