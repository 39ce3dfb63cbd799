//! Data model: the closed enumerations and the person record.

pub mod kind;
pub mod person;

pub use kind::{Gender, ParseEnumError, Relationship};
pub use person::{Person, PersonId, PersonRef};
