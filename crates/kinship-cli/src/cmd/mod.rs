pub mod completions;
pub mod demo;
pub mod graph;
pub mod list;
pub mod query;
pub mod relationships;
pub mod run;
pub mod show;
