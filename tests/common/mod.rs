//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - In-memory documents and scripted classifiers
//! - Generated PDFs for the MuPDF adapters
//! - Token and highlight builders
//! - Custom assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;
