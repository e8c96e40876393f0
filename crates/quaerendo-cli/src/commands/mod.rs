//! Command implementations.

pub mod auth;
pub mod browse;
pub mod profile;
pub mod submit;

pub use self::auth::{execute_login, execute_logout, execute_register, execute_whoami};
pub use self::browse::{execute_claim, execute_claims, execute_evidence, execute_open};
pub use self::profile::execute_profile;
pub use self::submit::{execute_submit_claim, execute_submit_evidence};
