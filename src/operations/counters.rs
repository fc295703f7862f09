use crate::display;
use crate::jura::{Jura, JuraError};

/// Polls the machine once and prints counters and availability. The state
/// is printed even when the poll fails, so an offline machine is visible
/// rather than silent.
pub async fn read_counters(jura: &Jura, json: bool) -> Result<(), JuraError> {
    let result = jura.refresh().await;
    if json {
        println!(
            "{}",
            serde_json::to_string(&jura.state()).expect("Failed to serialize state")
        );
    } else {
        display::display_state(&jura.state());
        println!();
    }
    result.map(|_| ())
}
