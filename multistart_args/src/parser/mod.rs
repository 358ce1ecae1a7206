mod base;
mod printer;

pub use base::{ParamSet, ParseError};
pub(crate) use printer::Printer;
