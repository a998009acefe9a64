//! Result and configuration model of the OpenDRIVE / OpenSCENARIO quality
//! checker framework, with `.xqar` and configuration XML serialization.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod params;
pub mod pooling;
pub mod result;
pub mod xml;

pub use error::{QcError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
