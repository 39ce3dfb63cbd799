//! Line-oriented command scripts for building and querying a tree.
//!
//! # Format
//!
//! ```text
//! # comment
//! ADD_PERSON "Queen Margret" FEMALE
//! ADD_SPOUSE "Queen Margret" "King Arthur"
//! ADD_CHILD "Queen Margret" Bill MALE
//! GET_RELATIONSHIP Remus MATERNAL_AUNT
//! ```
//!
//! Tokens are separated by whitespace; double quotes group a name that
//! contains spaces. Blank lines and lines starting with `#` are skipped.
//! Command words are case-insensitive, names are not.
//!
//! The relationship argument of `GET_RELATIONSHIP` is kept as raw text and
//! parsed by the tree at execution time, so a bad kind is reported as
//! [`TreeError::UnknownRelationship`] after the anchor has been checked.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorCode, TreeError};
use crate::model::kind::{Gender, ParseEnumError};
use crate::tree::FamilyTree;

/// One parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddPerson { name: String, gender: Gender },
    AddSpouse { person: String, spouse: String },
    AddChild { mother: String, child: String, gender: Gender },
    GetRelationship { person: String, relationship: String },
}

/// A statement together with the line it came from (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}

/// Result of executing one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Added {
        name: String,
    },
    Related {
        anchor: String,
        relationship: String,
        names: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {command} takes {expected} argument(s), got {got}")]
    WrongArity {
        line: usize,
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: unterminated quote")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: quotes must wrap a whole argument")]
    MisplacedQuote { line: usize },

    #[error("line {line}: empty name")]
    EmptyName { line: usize },

    #[error("line {line}: {source}")]
    InvalidGender {
        line: usize,
        #[source]
        source: ParseEnumError,
    },

    #[error("line {line}: {source}")]
    Tree {
        line: usize,
        #[source]
        source: TreeError,
    },
}

impl ScriptError {
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownCommand { line, .. }
            | Self::WrongArity { line, .. }
            | Self::UnterminatedQuote { line }
            | Self::MisplacedQuote { line }
            | Self::EmptyName { line }
            | Self::InvalidGender { line, .. }
            | Self::Tree { line, .. } => *line,
        }
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownCommand { .. }
            | Self::WrongArity { .. }
            | Self::UnterminatedQuote { .. }
            | Self::MisplacedQuote { .. }
            | Self::EmptyName { .. } => ErrorCode::ScriptSyntax,
            Self::InvalidGender { .. } => ErrorCode::InvalidGender,
            Self::Tree { source, .. } => source.code(),
        }
    }
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns the first syntax error encountered.
pub fn parse(source: &str) -> Result<Vec<Statement>, ScriptError> {
    let mut statements = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let tokens = tokenize(line, trimmed)?;
        let command = parse_command(line, &tokens)?;
        statements.push(Statement { line, command });
    }
    Ok(statements)
}

/// Apply statements in order, stopping at the first failure.
///
/// Statements before the failing one stay applied.
///
/// # Errors
///
/// Returns [`ScriptError::Tree`] carrying the failing line.
pub fn execute(
    tree: &mut FamilyTree,
    statements: &[Statement],
) -> Result<Vec<Outcome>, ScriptError> {
    let mut outcomes = Vec::with_capacity(statements.len());
    for statement in statements {
        let outcome = apply(tree, &statement.command).map_err(|source| ScriptError::Tree {
            line: statement.line,
            source,
        })?;
        outcomes.push(outcome);
    }
    debug!(statements = statements.len(), "script executed");
    Ok(outcomes)
}

/// Parse and execute in one step.
///
/// # Errors
///
/// Returns the first syntax or execution error.
pub fn run(tree: &mut FamilyTree, source: &str) -> Result<Vec<Outcome>, ScriptError> {
    let statements = parse(source)?;
    execute(tree, &statements)
}

fn apply(tree: &mut FamilyTree, command: &Command) -> Result<Outcome, TreeError> {
    match command {
        Command::AddPerson { name, gender } => {
            let person = tree.add_person(name.as_str(), *gender)?;
            Ok(Outcome::Added {
                name: person.name().to_string(),
            })
        }
        Command::AddSpouse { person, spouse } => {
            let spouse = tree.add_spouse(person, spouse.as_str())?;
            Ok(Outcome::Added {
                name: spouse.name().to_string(),
            })
        }
        Command::AddChild {
            mother,
            child,
            gender,
        } => {
            let child = tree.add_child(mother, child.as_str(), *gender)?;
            Ok(Outcome::Added {
                name: child.name().to_string(),
            })
        }
        Command::GetRelationship {
            person,
            relationship,
        } => {
            let names = tree.relationship_named(person, relationship)?;
            Ok(Outcome::Related {
                anchor: person.clone(),
                relationship: relationship.clone(),
                names,
            })
        }
    }
}

fn parse_command(line: usize, tokens: &[String]) -> Result<Command, ScriptError> {
    let (word, args) = tokens
        .split_first()
        .ok_or_else(|| ScriptError::UnknownCommand {
            line,
            command: String::new(),
        })?;

    let arity = |command: &'static str, expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ScriptError::WrongArity {
                line,
                command,
                expected,
                got: args.len(),
            })
        }
    };
    let name = |raw: &String| {
        if raw.is_empty() {
            Err(ScriptError::EmptyName { line })
        } else {
            Ok(raw.clone())
        }
    };
    let gender = |raw: &str| {
        raw.parse::<Gender>()
            .map_err(|source| ScriptError::InvalidGender { line, source })
    };

    match word.to_ascii_uppercase().as_str() {
        "ADD_PERSON" => {
            arity("ADD_PERSON", 2)?;
            Ok(Command::AddPerson {
                name: name(&args[0])?,
                gender: gender(args[1].as_str())?,
            })
        }
        "ADD_SPOUSE" => {
            arity("ADD_SPOUSE", 2)?;
            Ok(Command::AddSpouse {
                person: name(&args[0])?,
                spouse: name(&args[1])?,
            })
        }
        "ADD_CHILD" => {
            arity("ADD_CHILD", 3)?;
            Ok(Command::AddChild {
                mother: name(&args[0])?,
                child: name(&args[1])?,
                gender: gender(args[2].as_str())?,
            })
        }
        "GET_RELATIONSHIP" => {
            arity("GET_RELATIONSHIP", 2)?;
            Ok(Command::GetRelationship {
                person: name(&args[0])?,
                relationship: args[1].clone(),
            })
        }
        _ => Err(ScriptError::UnknownCommand {
            line,
            command: word.clone(),
        }),
    }
}

/// Split on whitespace, honoring double quotes. `None` on an open quote.
/// Split a line into tokens. A quoted token must start and end at token
/// boundaries; `""` yields an empty token.
fn tokenize(line: usize, input: &str) -> Result<Vec<String>, ScriptError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    // A quoted token just closed; only whitespace may follow.
    let mut closed = false;

    for c in input.chars() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
                closed = true;
            } else {
                current.push(c);
            }
        } else if c.is_whitespace() {
            if !current.is_empty() || closed {
                tokens.push(std::mem::take(&mut current));
            }
            closed = false;
        } else if closed || (c == '"' && !current.is_empty()) {
            return Err(ScriptError::MisplacedQuote { line });
        } else if c == '"' {
            in_quotes = true;
        } else {
            current.push(c);
        }
    }

    if in_quotes {
        return Err(ScriptError::UnterminatedQuote { line });
    }
    if !current.is_empty() || closed {
        tokens.push(current);
    }
    Ok(tokens)
}
