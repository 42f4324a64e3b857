//! Authentication utilities

mod google;
mod jwt;

pub use google::{GoogleIdentityProvider, GoogleTokenInfo};
pub use jwt::{Claims, JwtService, TOKEN_COOKIE};
