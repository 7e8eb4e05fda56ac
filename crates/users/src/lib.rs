//! Users known to the expense engine.
//!
//! Registry management lives outside the engine; this crate only defines the
//! user entity and the read-only lookup the engine validates against.

pub mod directory;
pub mod user;

pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use user::{ContactInfo, User};
