//! HBnB console - an interactive command interpreter over an object store.
//!
//! This library exposes the core modules for the binary and for integration
//! tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod models;
pub mod persistence;
