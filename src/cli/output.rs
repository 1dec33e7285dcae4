//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::PagesError;

/// Map domain/service errors to a string for CLI output.
/// Missing-argument errors print their message alone; everything else is prefixed.
pub fn map_error(e: &PagesError) -> String {
    if e.is_validation() {
        e.to_string()
    } else {
        format!("Error: {}", e)
    }
}
