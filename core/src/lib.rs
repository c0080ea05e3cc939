//! # sitrep core
//!
//! Turns the output of several overlapping host discovery tools into one
//! deduplicated inventory.
//!
//! * [`discovery`] drives the pipeline, stage by stage.
//! * [`scanner`] holds the scan techniques and their output grammars.
//! * [`controllers`] finds Active Directory domain controllers through SRV lookups.
//! * [`resolv`] reads the resolver configuration.
//! * [`inventory`] owns the running union of discovered hosts.
//! * [`system`] and [`exec`] are the concrete collaborators used outside of tests.

pub mod controllers;
pub mod discovery;
pub mod exec;
pub mod inventory;
pub mod resolv;
pub mod scanner;
pub mod system;
