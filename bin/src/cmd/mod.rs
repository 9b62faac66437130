//! CLI subcommand modules.
//!
//! This module contains the implementations for all rotation CLI subcommands.

pub(crate) mod fetch;
pub(crate) mod run;
