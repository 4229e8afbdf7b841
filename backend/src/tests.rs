//! Tests for the backend application bootstrap, covering readiness
//! signalling and graceful shutdown.

use super::server::{ServerConfig, create_server, drain_on_shutdown};
use actix_web::web;
use drawing_backend::inbound::http::health::HealthState;
use drawing_backend::outbound::persistence::{DbPool, PoolConfig};
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_address() -> (String, u16) {
    ("127.0.0.1".into(), 0)
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready_with_memory_store(
    health_state: web::Data<HealthState>,
    bind_address: (String, u16),
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), ServerConfig::new(bind_address))
        .expect("server should build without a database");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_rt::test]
async fn create_server_starts_while_database_is_unreachable(
    health_state: web::Data<HealthState>,
    bind_address: (String, u16),
) {
    let pool = DbPool::new_lazy(
        PoolConfig::new("postgres://drawings@127.0.0.1:1/drawings").with_retry_connection(false),
    );

    let _server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_address).with_db_pool(pool),
    )
    .expect("server should build with a lazy pool");

    assert!(health_state.is_ready());
}

#[rstest]
#[actix_rt::test]
async fn shutdown_fails_liveness_and_stops_server(
    health_state: web::Data<HealthState>,
    bind_address: (String, u16),
) {
    let server = create_server(health_state.clone(), ServerConfig::new(bind_address))
        .expect("server should build without a database");
    let handle = server.handle();
    let running = actix_rt::spawn(server);
    assert!(health_state.is_alive());

    drain_on_shutdown(health_state.clone(), handle, async {}).await;

    assert!(!health_state.is_alive(), "shutdown should fail liveness");
    running
        .await
        .expect("server task should join")
        .expect("server should stop cleanly");
}
