use std::fmt;
use std::path::PathBuf;

use crate::model::kind::{Gender, ParseEnumError};

/// Machine-readable error codes for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateEntity,
    NotFound,
    AlreadyMarried,
    InvalidParent,
    UnknownRelationship,
    InvalidGender,
    ScriptSyntax,
    ConfigParseError,
}

impl ErrorCode {
    /// Stable code identifier (`K####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateEntity => "K2001",
            Self::NotFound => "K2002",
            Self::AlreadyMarried => "K2003",
            Self::InvalidParent => "K2004",
            Self::UnknownRelationship => "K3001",
            Self::InvalidGender => "K3002",
            Self::ScriptSyntax => "K4001",
            Self::ConfigParseError => "K1001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DuplicateEntity => "Person already exists",
            Self::NotFound => "Person not found",
            Self::AlreadyMarried => "Person already has a spouse",
            Self::InvalidParent => "Children attach to the mother",
            Self::UnknownRelationship => "Unknown relationship",
            Self::InvalidGender => "Unknown gender",
            Self::ScriptSyntax => "Script syntax error",
            Self::ConfigParseError => "Config file parse error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DuplicateEntity => Some("Names are unique and case-sensitive; pick another name."),
            Self::NotFound => Some("Run `kin list` to see who is in the tree."),
            Self::AlreadyMarried => None,
            Self::InvalidParent => {
                Some("Add the child to the mother; the father is reached through her spouse.")
            }
            Self::UnknownRelationship => Some("Run `kin relationships` for the supported kinds."),
            Self::InvalidGender => Some("Use MALE or FEMALE."),
            Self::ScriptSyntax => Some("Check the statement against `COMMAND arg...` syntax."),
            Self::ConfigParseError => Some("Fix syntax in kinship.toml and retry."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures raised by [`FamilyTree`](crate::tree::FamilyTree) operations.
///
/// Every variant aborts the whole call: mutations leave the store untouched
/// and queries return no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A person with this name is already in the tree.
    #[error("person '{0}' already exists")]
    DuplicateEntity(String),

    /// The anchor person is not in the tree.
    #[error("Person {0} does not exist")]
    NotFound(String),

    #[error("person '{name}' already has a spouse ('{spouse}')")]
    AlreadyMarried { name: String, spouse: String },

    /// Children can only be added to a female anchor.
    #[error("person '{name}' is {gender}, children can only be added to a FEMALE parent")]
    InvalidParent { name: String, gender: Gender },

    #[error("unknown relationship '{0}'")]
    UnknownRelationship(String),
}

impl TreeError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateEntity(_) => ErrorCode::DuplicateEntity,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::AlreadyMarried { .. } => ErrorCode::AlreadyMarried,
            Self::InvalidParent { .. } => ErrorCode::InvalidParent,
            Self::UnknownRelationship(_) => ErrorCode::UnknownRelationship,
        }
    }
}

impl ParseEnumError {
    /// `InvalidGender` for gender values, `UnknownRelationship` otherwise.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        if self.expected == "gender" {
            ErrorCode::InvalidGender
        } else {
            ErrorCode::UnknownRelationship
        }
    }
}

/// A config file that exists but is not valid TOML for its schema.
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse {}", .path.display())]
pub struct ConfigError {
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConfigParseError
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, TreeError};
    use crate::model::kind::Gender;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::DuplicateEntity,
            ErrorCode::NotFound,
            ErrorCode::AlreadyMarried,
            ErrorCode::InvalidParent,
            ErrorCode::UnknownRelationship,
            ErrorCode::InvalidGender,
            ErrorCode::ScriptSyntax,
            ErrorCode::ConfigParseError,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::InvalidParent.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('K'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn not_found_message_names_the_person() {
        let err = TreeError::NotFound("Ghost".into());
        assert_eq!(err.to_string(), "Person Ghost does not exist");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn invalid_parent_mentions_gender() {
        let err = TreeError::InvalidParent {
            name: "John".into(),
            gender: Gender::Male,
        };
        assert!(err.to_string().contains("MALE"));
        assert_eq!(err.code().code(), "K2004");
    }

    #[test]
    fn parse_errors_map_to_their_codes() {
        let gender = "other".parse::<Gender>().unwrap_err();
        assert_eq!(gender.code(), ErrorCode::InvalidGender);
        let kind = "COUSIN".parse::<crate::Relationship>().unwrap_err();
        assert_eq!(kind.code(), ErrorCode::UnknownRelationship);
    }
}
