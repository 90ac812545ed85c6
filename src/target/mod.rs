//! The target language: code fragments, their builder API and the
//! rendering of fragment sequences into source files.
pub mod code;
pub mod file;
pub mod go;
pub mod imports;
pub mod pretty;

pub use self::code::Code;
