//! Domain models and types for NoteGuard.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Visit records** ([`VisitNote`], [`RedactedVisit`])
//! - **Error types** ([`NoteGuardError`], [`PresidioError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, NoteGuardError>`]:
//!
//! ```rust
//! use noteguard::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = noteguard::config::load_config("noteguard.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;
pub mod visit;

// Re-export commonly used types for convenience
pub use errors::{NoteGuardError, PresidioError, RemoteStage};
pub use result::Result;
pub use visit::{RedactedVisit, VisitNote, REDACTION_FAILED_NOTE};
