pub mod claims;
pub mod extract;
pub mod jwt;
pub mod password;

pub use claims::Claims;
pub use extract::CurrentUser;
pub use jwt::{JwtManager, TokenPair};
pub use password::{hash_password, verify_password};
