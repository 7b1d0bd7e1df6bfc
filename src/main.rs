use std::sync::Arc;

use planning_poker::adapters::auth::JwtProfileResolver;
use planning_poker::adapters::http::{app_router, RoomHandlers};
use planning_poker::adapters::storage::{InMemoryRoomStore, RedisRoomStore};
use planning_poker::adapters::websocket::{
    BroadcastHub, ConnectionRegistry, RoomSession, WebSocketState,
};
use planning_poker::application::handlers::room::{
    CreateRoomHandler, RecentRoomsHandler, RoomActionHandler,
};
use planning_poker::config::{AppConfig, StorageBackend};
use planning_poker::ports::RoomStore;
use planning_poker::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    telemetry::init(config.server.environment, &config.server.log_level);

    let store: Arc<dyn RoomStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory room store; rooms are lost on restart");
            Arc::new(InMemoryRoomStore::new())
        }
        StorageBackend::Redis => Arc::new(RedisRoomStore::connect(&config.redis).await?),
    };

    let mut actions = RoomActionHandler::new(store.clone());
    if let Some(secret) = config
        .auth
        .profile_token_secret
        .as_ref()
        .filter(|_| config.auth.profiles_enabled())
    {
        actions = actions.with_profiles(Arc::new(JwtProfileResolver::new(secret)));
    }

    let registry = Arc::new(ConnectionRegistry::new());
    let hub = Arc::new(BroadcastHub::new(registry.clone()));
    let session = Arc::new(RoomSession::new(
        registry.clone(),
        hub,
        store.clone(),
        Arc::new(actions),
    ));

    let app = app_router(
        RoomHandlers::new(
            Arc::new(CreateRoomHandler::new(store.clone())),
            Arc::new(RecentRoomsHandler::new(store)),
        ),
        WebSocketState::new(session, config.websocket.outbound_buffer),
        &config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        storage = ?config.storage.backend,
        "Planning poker server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let open_connections = registry.total_connections().await;
    let active_rooms = registry.active_rooms().await.len();
    tracing::info!(open_connections, active_rooms, "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
