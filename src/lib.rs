extern crate codespan_reporting;
extern crate indexmap;
extern crate itertools;
extern crate pretty;
extern crate regex;
extern crate serde;
extern crate serde_json;
extern crate structopt;
extern crate thiserror;
extern crate tracing;
#[macro_use]
extern crate lazy_static;

pub mod common;
pub mod driver;
pub mod syntax;
pub mod target;
pub mod translate;
