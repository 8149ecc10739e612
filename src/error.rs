use crate::types::ParentRole;
use thiserror::Error;

/// Fatal errors raised while building, validating or querying a family tree.
///
/// The `Display` text of each variant is the single diagnostic line the
/// binary prints before exiting.
#[derive(Error, Debug)]
pub enum FamilyError {
    #[error("Bad input -- sex mismatch on line {line}")]
    SexMismatch { line: usize, name: String },

    #[error("Bad input -- child with two {} on line {line}", .role.plural())]
    DuplicateParent {
        line: usize,
        role: ParentRole,
        child: String,
    },

    #[error("Bad input -- cycle in specification")]
    CycleDetected { name: String },

    #[error("Bad input -- no PERSON before line {line}")]
    MissingSubject { line: usize },

    #[error("Bad input -- unrecognized sex '{value}' on line {line}")]
    InvalidSex { line: usize, value: String },

    #[error("Bad input -- unknown keyword '{keyword}' on line {line}")]
    UnknownKeyword { line: usize, keyword: String },

    #[error("Unknown person: '{0}'")]
    UnknownPerson(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FamilyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_lines() {
        let err = FamilyError::SexMismatch { line: 4, name: "Alice".into() };
        assert_eq!(err.to_string(), "Bad input -- sex mismatch on line 4");

        let err = FamilyError::DuplicateParent {
            line: 9,
            role: ParentRole::Mother,
            child: "John".into(),
        };
        assert_eq!(err.to_string(), "Bad input -- child with two mothers on line 9");

        let err = FamilyError::CycleDetected { name: "A".into() };
        assert_eq!(err.to_string(), "Bad input -- cycle in specification");
    }
}
