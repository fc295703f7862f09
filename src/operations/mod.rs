//! The operations behind each CLI subcommand.

mod brew;
mod counters;
mod power;
mod watch;

pub use brew::*;
pub use counters::*;
pub use power::*;
pub use watch::*;
