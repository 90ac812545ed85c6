pub mod pos;
pub mod prettify;
