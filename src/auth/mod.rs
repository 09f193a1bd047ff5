//! Authentication and session management

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod session;

pub use credentials::{hash_password, CredentialPolicy};
pub use jwt::{create_token, validate_token, Claims};
pub use middleware::{extract_claims, extract_token, identify_request};
pub use models::{IdentityInfo, LoginRequest, LoginResponse};
pub use session::{Session, SessionStore};
