//! Command line driver: options, file handling and reporting.
pub mod error;
pub mod options;
pub mod resources;
pub mod statistics;
pub mod translate;
