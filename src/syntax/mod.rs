pub mod ast;
pub mod error;
pub mod input;
pub mod make;
