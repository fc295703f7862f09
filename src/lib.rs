//! API and CLI for JURA coffee machines reachable over an HTTP-to-serial
//! bridge.
//!
//! A fixed schedule polls the machine for its EEPROM cup counters and
//! keeps its availability up to date; two control points (power, brew) can
//! be actuated on top of that. The [`jura::Jura`] handle carries the whole
//! adapter: clone it freely, stream [`jura::JuraEvent`]s from it, shut it
//! down when the machine goes away. Developed against an E60 behind a
//! WiFi bridge; other models speaking the same text protocol should work
//! as well.
//!
//! # Examples
//!
//! Watch a machine:
//!
//! ```text
//! $ ristretto watch --host http://10.0.0.42/
//! ✅ online, espresso 417 | coffee 693
//! ```
//!
//! Read the counters once, as JSON:
//!
//! ```text
//! $ ristretto status --host http://10.0.0.42/ --json
//! {"status":"online","counters":{"cupsEspresso":417,"cupsCoffee":693}}
//! ```
//!
//! Brew a coffee:
//!
//! ```text
//! $ ristretto brew --host http://10.0.0.42/
//! Brew command acknowledged
//! ```
//!
//! No machine? `--simulate` swaps the hardware for [`jura::get_jura_simulator`],
//! and the `ristretto-emulator` binary serves the same simulator over HTTP.

pub mod display;
pub mod emulator;
pub mod jura;
pub mod logging;
pub mod operations;
mod prelude;
pub mod protocol;
