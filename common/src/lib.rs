//! Shared data model and collaborator contracts for `sitrep`.
//!
//! Nothing in here talks to the operating system. The concrete
//! implementations of [`system::SystemRepository`] and [`exec::CommandRunner`]
//! live in `sitrep-core`; tests swap them for stubs.

pub mod audit;
pub mod config;
pub mod error;
pub mod exec;
pub mod network;
pub mod system;

/// Renders items one per line, each terminated by a newline.
pub fn lines_artifact<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    items.into_iter().map(|item| format!("{item}\n")).collect()
}
