//! The [`Jura`] handle and the drivers it can sit on top of.

use thiserror::Error;

mod driver;
mod jura;
mod jura_http;
mod jura_simulate;

pub use driver::JuraDriver;
pub use jura::{
    Jura, JuraEvent, JuraState, JuraStatus, PollSchedule, DEFAULT_INITIAL_DELAY,
    DEFAULT_POLL_PERIOD,
};
pub use jura_http::{get_jura_http, JuraHttp};
pub use jura_simulate::get_jura_simulator;

/// Static configuration for one machine: where its HTTP bridge answers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JuraConfig {
    /// Full URL of the bridge, eg. `http://10.0.0.42/`.
    pub host: String,
}

/// Everything that can go wrong talking to a machine.
#[derive(Error, Debug)]
pub enum JuraError {
    /// The exchange with the bridge failed below the protocol: connection
    /// refused, timeout, interrupted transfer.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The bridge answered, but not with the acknowledgement the command
    /// calls for.
    #[error("response '{actual}' does not carry the expected ack '{expected}'")]
    InvalidResponse { actual: String, expected: String },
    /// An acknowledged status payload with no readable counter at the
    /// expected position.
    #[error("no counter at {offset}+{len} in status payload '{payload}'")]
    Parse {
        payload: String,
        offset: usize,
        len: usize,
    },
}
