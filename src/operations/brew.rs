use crate::jura::{Jura, JuraError};
use crate::protocol::ControlPoint;

/// Brews one regular coffee. The machine only acknowledges the command
/// here; the cup shows up in the counters on a later poll.
pub async fn brew_coffee(jura: &Jura) -> Result<(), JuraError> {
    jura.actuate(ControlPoint::BrewCoffee).await?;
    println!("Brew command acknowledged");
    Ok(())
}
