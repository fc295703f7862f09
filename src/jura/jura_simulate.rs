use std::sync::Mutex;

use crate::jura::JuraDriver;
use crate::prelude::*;
use crate::protocol::Command;

/// How long the pretend bridge takes to answer.
const SIMULATED_LATENCY: Duration = Duration::from_millis(25);

/// The machine behind the simulated bridge.
struct SimulatedMachine {
    powered: bool,
    cups_espresso: u32,
    cups_ristretto: u32,
    cups_coffee: u32,
    rinse_cycles: u32,
}

impl SimulatedMachine {
    fn counters(&self) -> String {
        format!(
            "rt:{:04x}{:04x}{:04x}{:04x}",
            self.cups_espresso & 0xffff,
            self.cups_ristretto & 0xffff,
            self.cups_coffee & 0xffff,
            self.rinse_cycles & 0xffff
        )
    }
}

/// Simulated driver for trying the CLI without a machine on the network.
/// It starts switched off and refuses to brew until powered on.
struct JuraSimulate {
    machine: Mutex<SimulatedMachine>,
}

impl JuraSimulate {
    fn respond(&self, payload: &str) -> String {
        let mut machine = self
            .machine
            .lock()
            .expect("Failed to lock the simulated machine");
        if payload == Command::ReadCounters.payload() {
            machine.counters()
        } else if payload == Command::PowerOn.payload() {
            machine.powered = true;
            "ok:".to_owned()
        } else if payload == Command::BrewCoffee.payload() {
            if machine.powered {
                machine.cups_coffee += 1;
                "ok:".to_owned()
            } else {
                "err:standby".to_owned()
            }
        } else {
            "err:unsupported".to_owned()
        }
    }
}

impl JuraDriver for JuraSimulate {
    fn exchange<'a>(&'a self, payload: &'a str) -> AsyncFuture<'a, String> {
        Box::pin(async move {
            trace_exchange!("{{host->device}} {}", payload);
            tokio::time::sleep(SIMULATED_LATENCY).await;
            let response = self.respond(payload);
            trace_exchange!("{{device->host}} {}", response);
            Ok(response)
        })
    }
}

/// Returns a driver backed by a simulated machine with a believable
/// counter history.
pub fn get_jura_simulator() -> impl JuraDriver {
    JuraSimulate {
        machine: Mutex::new(SimulatedMachine {
            powered: false,
            cups_espresso: 0x01a2,
            cups_ristretto: 0x004c,
            cups_coffee: 0x02b7,
            rinse_cycles: 0x0054,
        }),
    }
}
