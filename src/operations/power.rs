use crate::jura::{Jura, JuraError};
use crate::protocol::ControlPoint;

/// Switches the machine on.
pub async fn power_on(jura: &Jura) -> Result<(), JuraError> {
    jura.actuate(ControlPoint::Power).await?;
    println!("Machine switched on");
    Ok(())
}
