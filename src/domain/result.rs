//! Crate-wide result alias

use super::errors::NoteGuardError;

/// Result of a NoteGuard operation
///
/// ```
/// use noteguard::domain::{NoteGuardError, Result};
///
/// fn require_note(text: &str) -> Result<&str> {
///     if text.is_empty() {
///         return Err(NoteGuardError::Validation("empty note".to_string()));
///     }
///     Ok(text)
/// }
///
/// assert!(require_note("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, NoteGuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_convert_with_question_mark() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("no/such/note.txt")?)
        }

        assert!(matches!(read_missing(), Err(NoteGuardError::Io(_))));
    }
}
