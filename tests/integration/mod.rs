//! Integration tests for the HBnB console.

pub mod binary_test;
pub mod common;
pub mod console_test;
pub mod persistence_test;
