//! The text protocol spoken by bridged JURA machines.

mod command;
mod response;

pub use command::*;
pub use response::*;
