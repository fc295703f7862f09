//! Commands, their fixed wire payloads and the control points they hang off.

/// Channel through which the coffee-cup counter is reported.
pub const CHANNEL_CUPS_COFFEE: &str = "cupsCoffee";
/// Channel through which the espresso-cup counter is reported.
pub const CHANNEL_CUPS_ESPRESSO: &str = "cupsEspresso";
/// Channel that switches the machine on.
pub const CHANNEL_POWER: &str = "power";
/// Channel that brews one regular coffee.
pub const CHANNEL_BREW_COFFEE: &str = "brewCoffee";

/// A command understood by the machine. Each one is a fixed text payload,
/// and every valid response to it starts with a fixed acknowledgement
/// prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Read the line of EEPROM holding the cup counters.
    ReadCounters,
    /// Switch the machine on.
    PowerOn,
    /// Brew one regular coffee.
    BrewCoffee,
}

impl Command {
    /// The exact text sent to the machine for this command.
    pub fn payload(&self) -> &'static str {
        match self {
            Command::ReadCounters => "RT:0000",
            Command::PowerOn => "AN:02",
            Command::BrewCoffee => "FA:07",
        }
    }

    /// The prefix a valid response to this command must carry.
    pub fn ack_prefix(&self) -> &'static str {
        match self {
            Command::ReadCounters => "rt:",
            Command::PowerOn => "ok:",
            Command::BrewCoffee => "ok:",
        }
    }
}

/// An actuation target exposed to the host environment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlPoint {
    Power,
    BrewCoffee,
}

impl ControlPoint {
    /// Resolves a channel identifier to a control point, if it names one.
    pub fn from_id(id: &str) -> Option<ControlPoint> {
        match id {
            CHANNEL_POWER => Some(ControlPoint::Power),
            CHANNEL_BREW_COFFEE => Some(ControlPoint::BrewCoffee),
            _ => None,
        }
    }

    /// The channel identifier for this control point.
    pub fn id(&self) -> &'static str {
        match self {
            ControlPoint::Power => CHANNEL_POWER,
            ControlPoint::BrewCoffee => CHANNEL_BREW_COFFEE,
        }
    }

    /// The device command issued when this control point is switched on.
    pub fn activate_command(&self) -> Command {
        match self {
            ControlPoint::Power => Command::PowerOn,
            ControlPoint::BrewCoffee => Command::BrewCoffee,
        }
    }
}

/// A command value delivered by the host environment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandValue {
    On,
    Off,
    /// Not an actuation: asks for an immediate out-of-schedule status poll.
    Refresh,
}
