use std::time::Duration;

use clap::{arg, command, ArgMatches};

use ristretto::jura::{
    get_jura_http, get_jura_simulator, Jura, JuraConfig, JuraDriver, PollSchedule,
};
use ristretto::{display, logging, operations, protocol};

/// Builds the adapter for the machine named by the common arguments.
fn connect(cmd: &ArgMatches) -> Result<Jura, Box<dyn std::error::Error>> {
    if cmd.get_flag("trace") {
        logging::enable_tracing();
    }

    let driver: Box<dyn JuraDriver> = if cmd.get_flag("simulate") {
        Box::new(get_jura_simulator())
    } else {
        match cmd.get_one::<String>("host") {
            Some(host) => Box::new(get_jura_http(JuraConfig { host: host.clone() })?),
            None => return Err("either --host or --simulate is required".into()),
        }
    };

    // Only `watch` defines --period.
    let schedule = match cmd.try_get_one::<String>("period").ok().flatten() {
        Some(secs) => PollSchedule {
            period: Duration::from_secs(secs.parse()?),
            ..PollSchedule::default()
        },
        None => PollSchedule::default(),
    };

    Ok(Jura::with_schedule(driver, schedule))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    display::initialize_display();

    let host = arg!(--host [url]).help("URL of the machine's HTTP bridge");
    let simulate = arg!(--simulate).help("Talk to a simulated machine instead of hardware");
    let trace = arg!(--trace).help("Trace every exchange with the machine");
    let json = arg!(--json).help("Print machine-readable JSON instead of a status line");

    let matches = command!()
        .subcommand(
            command!("status")
                .about("Poll the machine once and print counters and availability")
                .arg(host.clone())
                .arg(simulate.clone())
                .arg(trace.clone())
                .arg(json.clone()),
        )
        .subcommand(
            command!("watch")
                .about("Run the scheduled poll and render every update")
                .arg(host.clone())
                .arg(simulate.clone())
                .arg(trace.clone())
                .arg(json.clone())
                .arg(arg!(--period [secs]).help("Seconds between scheduled polls")),
        )
        .subcommand(
            command!("power-on")
                .about("Switch the machine on")
                .arg(host.clone())
                .arg(simulate.clone())
                .arg(trace.clone()),
        )
        .subcommand(
            command!("brew")
                .about("Brew a regular coffee")
                .arg(host.clone())
                .arg(simulate.clone())
                .arg(trace.clone()),
        )
        .subcommand(
            command!("x-send")
                .about("Send a raw payload to the machine")
                .hide(true)
                .arg(host.clone())
                .arg(simulate.clone())
                .arg(trace.clone())
                .arg(arg!(--payload <text>).help("Payload to send verbatim"))
                .arg(arg!(--expect [prefix]).help("Require this ack prefix on the response")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("status", cmd)) => {
            let jura = connect(cmd)?;
            let result = operations::read_counters(&jura, cmd.get_flag("json")).await;
            jura.shutdown();
            result?;
        }
        Some(("watch", cmd)) => {
            let jura = connect(cmd)?;
            operations::watch(&jura, cmd.get_flag("json")).await?;
        }
        Some(("power-on", cmd)) => {
            let jura = connect(cmd)?;
            let result = operations::power_on(&jura).await;
            jura.shutdown();
            result?;
        }
        Some(("brew", cmd)) => {
            let jura = connect(cmd)?;
            let result = operations::brew_coffee(&jura).await;
            jura.shutdown();
            result?;
        }
        Some(("x-send", cmd)) => {
            let jura = connect(cmd)?;
            let payload = cmd
                .get_one::<String>("payload")
                .expect("Payload required")
                .clone();
            let response = jura.send_raw(&payload).await;
            jura.shutdown();
            let response = response?;
            match cmd.get_one::<String>("expect") {
                Some(prefix) => println!("{}", protocol::expect_ack(&response, prefix)?),
                None => println!("{}", response),
            }
        }
        _ => {}
    }

    Ok(())
}
