//! Text inputs: body model, initial conditions and orientation table
//!
//! Model rows are parsed tolerantly (bad rows are skipped with a warning).
//! The orientation table is all-or-nothing.

pub mod conditions;
pub mod model;
pub mod orientations;

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{DropError, Result};

pub use conditions::{HeightCandidate, drop_height_candidates, resolve_drop_height};
pub use model::{ModelParse, RowWarning, SkipReason, parse_model, read_model};
pub use orientations::parse_orientations;

/// Read a required text file; a missing file is a `MissingInput` error
pub(crate) fn read_required(path: &Path, what: &str) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Err(DropError::MissingInput(format!("{what} file not specified")));
    }
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            DropError::MissingInput(format!("{what} file not found: {}", path.display()))
        }
        _ => DropError::io(path, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = read_required(Path::new("/nonexistent/dropdeck/model.txt"), "System model")
            .unwrap_err();
        assert!(matches!(err, DropError::MissingInput(_)));
        assert!(err.to_string().contains("System model file not found"));

        let err = read_required(Path::new(""), "Initial conditions").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing input: Initial conditions file not specified"
        );
    }
}
