use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The two genders a person record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// The gender assigned to a newly created spouse.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// The closed set of relationship kinds the resolver answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    Son,
    Daughter,
    Siblings,
    PaternalUncle,
    MaternalUncle,
    PaternalAunt,
    MaternalAunt,
    SisterInLaw,
    BrotherInLaw,
}

impl Relationship {
    /// Every relationship kind, in table order.
    pub const ALL: [Self; 9] = [
        Self::Son,
        Self::Daughter,
        Self::Siblings,
        Self::PaternalUncle,
        Self::MaternalUncle,
        Self::PaternalAunt,
        Self::MaternalAunt,
        Self::SisterInLaw,
        Self::BrotherInLaw,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Son => "SON",
            Self::Daughter => "DAUGHTER",
            Self::Siblings => "SIBLINGS",
            Self::PaternalUncle => "PATERNAL_UNCLE",
            Self::MaternalUncle => "MATERNAL_UNCLE",
            Self::PaternalAunt => "PATERNAL_AUNT",
            Self::MaternalAunt => "MATERNAL_AUNT",
            Self::SisterInLaw => "SISTER_IN_LAW",
            Self::BrotherInLaw => "BROTHER_IN_LAW",
        }
    }

    /// One-line description of how the kind is derived.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Son => "sons",
            Self::Daughter => "daughters",
            Self::Siblings => "other children of the same mother",
            Self::PaternalUncle => "father's brothers",
            Self::MaternalUncle => "mother's brothers",
            Self::PaternalAunt => "father's sisters",
            Self::MaternalAunt => "mother's sisters",
            Self::SisterInLaw => "spouse's sisters and wives of spouse's brothers",
            Self::BrotherInLaw => "spouse's brothers and husbands of spouse's sisters",
        }
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            _ => Err(ParseEnumError {
                expected: "gender",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Relationship {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "relationship",
                got: s.to_string(),
            })
    }
}
