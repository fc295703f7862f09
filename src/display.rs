//! Terminal rendering of the adapter state.

use std::io::Write;
use std::sync::Mutex;

use colored::*;
use lazy_static::lazy_static;

use crate::jura::{JuraState, JuraStatus};

lazy_static! {
    static ref DISPLAY: Mutex<Option<Box<dyn StateDisplay>>> = Mutex::new(None);
}

/// Picks a display implementation from the terminal environment: colour
/// where the terminal advertises it, a plain line when piped.
pub fn initialize_display() {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();

    let display: Box<dyn StateDisplay> = if term.is_none() || !atty::is(atty::Stream::Stdout) {
        Box::new(PlainDisplay::default())
    } else if colorterm.is_some() {
        Box::new(ColouredDisplay::default())
    } else {
        Box::new(BasicDisplay::default())
    };
    *DISPLAY
        .lock()
        .expect("Failed to lock display for initialization") = Some(display);
}

/// Renders the current adapter state on the chosen display.
pub fn display_state(state: &JuraState) {
    if let Ok(mut display) = DISPLAY.lock() {
        if let Some(ref mut display) = *display {
            display.display(state);
            return;
        }
    }
    println!("{:?}", state);
}

fn describe_state(state: &JuraState) -> String {
    let counters = match &state.counters {
        Some(counters) => format!(
            "espresso {} | coffee {}",
            counters.cups_espresso, counters.cups_coffee
        ),
        None => "no counters yet".to_owned(),
    };
    match &state.status {
        JuraStatus::Unknown { detail: None } => "unknown (waiting for first poll)".to_owned(),
        JuraStatus::Unknown {
            detail: Some(detail),
        } => format!("unknown: {}", detail),
        JuraStatus::Online => format!("online, {}", counters),
        JuraStatus::Offline { reason } => {
            format!("offline (communication error): {}", reason)
        }
    }
}

trait StateDisplay: Send + Sync {
    fn display(&mut self, state: &JuraState);
}

/// One line per update, no control characters. For pipes and dumb
/// terminals.
#[derive(Default)]
struct PlainDisplay {}

impl StateDisplay for PlainDisplay {
    fn display(&mut self, state: &JuraState) {
        println!("{}", describe_state(state));
    }
}

/// Overwrites a single status line in place.
#[derive(Default)]
struct BasicDisplay {}

impl StateDisplay for BasicDisplay {
    fn display(&mut self, state: &JuraState) {
        print!("\r{:<78}", describe_state(state));
        std::io::stdout().flush().unwrap();
    }
}

/// Overwrites a single status line in place, with colour and a status
/// glyph.
#[derive(Default)]
struct ColouredDisplay {}

impl StateDisplay for ColouredDisplay {
    fn display(&mut self, state: &JuraState) {
        let text = format!("{:<74}", describe_state(state));
        let line = match &state.status {
            JuraStatus::Online => format!("✅ {}", text).green(),
            JuraStatus::Offline { .. } => format!("⚠️ {}", text).red(),
            JuraStatus::Unknown { .. } => format!("❓ {}", text).yellow(),
        };
        print!("\r{}", line);
        std::io::stdout().flush().unwrap();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::CupCounters;

    fn state(status: JuraStatus, counters: Option<CupCounters>) -> JuraState {
        JuraState { status, counters }
    }

    #[test]
    fn descriptions_cover_every_status() {
        assert_eq!(
            describe_state(&state(JuraStatus::Unknown { detail: None }, None)),
            "unknown (waiting for first poll)"
        );
        assert_eq!(
            describe_state(&state(
                JuraStatus::Unknown {
                    detail: Some("response 'error' does not carry...".to_owned())
                },
                None
            )),
            "unknown: response 'error' does not carry..."
        );
        assert_eq!(
            describe_state(&state(
                JuraStatus::Online,
                Some(CupCounters {
                    cups_espresso: 417,
                    cups_coffee: 693
                })
            )),
            "online, espresso 417 | coffee 693"
        );
        assert_eq!(
            describe_state(&state(
                JuraStatus::Offline {
                    reason: "connection refused".to_owned()
                },
                None
            )),
            "offline (communication error): connection refused"
        );
    }

    #[test]
    fn online_without_counters_still_renders() {
        // Cannot happen through the poll cycle, but the display should not
        // care.
        assert_eq!(
            describe_state(&state(JuraStatus::Online, None)),
            "online, no counters yet"
        );
    }
}
