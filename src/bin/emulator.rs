//! Serves a simulated JURA machine over HTTP, for poking at the CLI
//! without hardware on the network.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{arg, command};

use ristretto::emulator;
use ristretto::jura::get_jura_simulator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let matches = command!()
        .name("ristretto-emulator")
        .about("Serves a simulated JURA machine over HTTP")
        .arg(arg!(--bind [addr]).help("Address to listen on").default_value("127.0.0.1:8080"))
        .get_matches();

    let bind = matches
        .get_one::<String>("bind")
        .expect("bind has a default");
    let addr: SocketAddr = bind.parse()?;

    let app = emulator::router(Arc::new(get_jura_simulator()));
    let server = axum::Server::bind(&addr).serve(app.into_make_service());
    println!("Simulated machine listening on http://{}/", server.local_addr());
    server.await?;
    Ok(())
}
