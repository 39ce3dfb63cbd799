//! kinship-core library.
//!
//! A genealogical graph of people linked by three primitive edges (mother,
//! spouse, children) and a resolver that derives named relationships
//! (uncles, aunts, siblings, in-laws) from them.
//!
//! ```
//! use kinship_core::{FamilyTree, Gender, Relationship};
//!
//! let mut tree = FamilyTree::new();
//! tree.add_person("Jane", Gender::Female)?;
//! tree.add_child("Jane", "Michael", Gender::Male)?;
//! tree.add_spouse("Michael", "Conny")?;
//! tree.add_child("Jane", "David", Gender::Male)?;
//! tree.add_child("Conny", "Emily", Gender::Female)?;
//!
//! let uncles = tree.relationship("Emily", Relationship::PaternalUncle)?;
//! assert_eq!(uncles, ["David"]);
//! # Ok::<(), kinship_core::TreeError>(())
//! ```
//!
//! # Conventions
//!
//! - **Errors**: domain failures are [`TreeError`] / [`script::ScriptError`];
//!   `anyhow::Result` is used where files are read (config).
//! - **Logging**: `tracing` macros only; the library never installs a
//!   subscriber.

pub mod config;
pub mod error;
pub mod model;
pub mod resolve;
pub mod sample;
pub mod script;
pub mod tree;

pub use error::{ConfigError, ErrorCode, TreeError};
pub use model::{Gender, ParseEnumError, PersonId, PersonRef, Relationship};
pub use tree::FamilyTree;
