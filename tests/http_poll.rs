//! End-to-end tests over real HTTP: the reqwest driver on one side, the
//! axum emulator serving the simulated machine on the other.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_stream::StreamExt;

use ristretto::emulator;
use ristretto::jura::{
    get_jura_http, get_jura_simulator, Jura, JuraConfig, JuraError, JuraEvent, JuraStatus,
    PollSchedule,
};
use ristretto::protocol::{CommandValue, CHANNEL_BREW_COFFEE, CHANNEL_POWER};

/// Keeps scheduled polls out of the way so the test drives every poll by
/// hand.
fn parked() -> PollSchedule {
    PollSchedule {
        initial_delay: Duration::from_secs(600),
        period: Duration::from_secs(600),
    }
}

async fn serve_emulator() -> SocketAddr {
    let app = emulator::router(Arc::new(get_jura_simulator()));
    let server =
        axum::Server::bind(&"127.0.0.1:0".parse().unwrap()).serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    addr
}

fn config_for(addr: SocketAddr) -> JuraConfig {
    JuraConfig {
        host: format!("http://{}/", addr),
    }
}

#[tokio::test]
async fn poll_brew_and_poll_again_over_http() {
    let addr = serve_emulator().await;
    let driver = get_jura_http(config_for(addr)).expect("http driver");
    let jura = Jura::with_schedule(Box::new(driver), parked());

    assert_eq!(jura.status(), JuraStatus::Unknown { detail: None });

    let before = jura.refresh().await.expect("first poll");
    assert_eq!(jura.status(), JuraStatus::Online);

    // The simulated machine starts switched off and refuses to brew.
    jura.handle_command(CHANNEL_BREW_COFFEE, CommandValue::On)
        .await;
    match jura.status() {
        JuraStatus::Unknown {
            detail: Some(detail),
        } => assert!(detail.contains("standby")),
        other => panic!("unexpected status: {:?}", other),
    }

    // Powering on succeeds, and a clean dispatch publishes nothing, so the
    // availability stays where the failed brew left it until the next poll.
    jura.handle_command(CHANNEL_POWER, CommandValue::On).await;
    assert!(matches!(jura.status(), JuraStatus::Unknown { .. }));

    jura.handle_command(CHANNEL_BREW_COFFEE, CommandValue::On)
        .await;
    let after = jura.refresh().await.expect("poll after brewing");
    assert_eq!(jura.status(), JuraStatus::Online);
    assert_eq!(after.cups_coffee, before.cups_coffee + 1);
    assert_eq!(after.cups_espresso, before.cups_espresso);

    // Raw exchanges go through untouched; the simulator refuses junk.
    assert_eq!(
        jura.send_raw("XX:99").await.expect("raw exchange"),
        "err:unsupported"
    );

    jura.shutdown();
    assert!(!jura.is_alive());
}

#[tokio::test]
async fn scheduled_polls_flow_through_the_emulator() {
    let addr = serve_emulator().await;
    let driver = get_jura_http(config_for(addr)).expect("http driver");
    let jura = Jura::with_schedule(
        Box::new(driver),
        PollSchedule {
            initial_delay: Duration::from_millis(10),
            period: Duration::from_millis(50),
        },
    );

    let mut updates = jura.updates();
    let first = tokio::time::timeout(Duration::from_secs(5), updates.next())
        .await
        .expect("no update within five seconds")
        .expect("the stream should still be open");
    assert!(matches!(first, JuraEvent::Counters(_)));

    let second = tokio::time::timeout(Duration::from_secs(5), updates.next())
        .await
        .expect("no update within five seconds")
        .expect("the stream should still be open");
    assert_eq!(second, JuraEvent::Status(JuraStatus::Online));

    jura.shutdown();
    let end = tokio::time::timeout(Duration::from_secs(5), updates.next())
        .await
        .expect("the stream should end after shutdown");
    assert_eq!(end, None);
}

#[tokio::test]
async fn dead_endpoint_reports_offline() {
    // Bind a port to learn a free address, then close it again.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let driver = get_jura_http(config_for(addr)).expect("http driver");
    let jura = Jura::with_schedule(Box::new(driver), parked());

    let error = jura.refresh().await.expect_err("nothing is listening");
    assert!(matches!(error, JuraError::Transport(_)));
    match jura.status() {
        JuraStatus::Offline { reason } => assert!(!reason.is_empty()),
        other => panic!("unexpected status: {:?}", other),
    }
    assert_eq!(jura.counters(), None);
}
