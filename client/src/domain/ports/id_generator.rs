//! Port abstraction over identifier generation.
//!
//! Upload filenames embed fresh UUIDs; injecting the generator keeps
//! usecase tests deterministic.

use uuid::Uuid;

/// Driven port for generating fresh UUIDs.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Produce a new random UUID.
    fn generate(&self) -> Uuid;
}
