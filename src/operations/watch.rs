use crate::display;
use crate::jura::{Jura, JuraError};
use crate::prelude::*;

/// Renders every update from the scheduled poll until the adapter shuts
/// down or the process is interrupted.
pub async fn watch(jura: &Jura, json: bool) -> Result<(), JuraError> {
    let mut updates = jura.updates();
    if !json {
        display::display_state(&jura.state());
    }
    while let Some(event) = updates.next().await {
        if json {
            println!(
                "{}",
                serde_json::to_string(&event).expect("Failed to serialize event")
            );
        } else {
            display::display_state(&jura.state());
        }
    }
    Ok(())
}
