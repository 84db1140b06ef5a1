//! Database wiring, module assembly, and the axum serve loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::trace::TraceLayer;
use tracing::info;

use account_service::domain::repository::UsersRepository;
use account_service::infra::storage::{SeaOrmPasswordResetsRepository, SeaOrmUsersRepository};
use address_service::infra::storage::SeaOrmAddressesRepository;
use notification_service::domain::QueueDispatcher;
use notification_service::infra::email::HttpMailClient;
use notification_service::{AccountDirectory, NotificationDispatcher, Recipient};
use store_service::infra::storage::{SeaOrmSegmentsRepository, SeaOrmStoresRepository};

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> Result<DatabaseConnection> {
    Database::connect(&config.database.url)
        .await
        .with_context(|| format!("could not connect to {}", config.database.url))
}

/// Run every module's migrator. Account tables come first so later tables
/// can assume users exist.
pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
    account_service::infra::storage::migrations::Migrator::up(db, None).await?;
    address_service::infra::storage::migrations::Migrator::up(db, None).await?;
    store_service::infra::storage::migrations::Migrator::up(db, None).await?;
    info!("migrations applied");
    Ok(())
}

/// Recipient lookup for the notification worker, backed by the users
/// repository.
struct UsersDirectory {
    users: Arc<SeaOrmUsersRepository>,
}

#[async_trait]
impl AccountDirectory for UsersDirectory {
    async fn find_recipient(&self, account_id: i64) -> Result<Option<Recipient>> {
        let account = self.users.find_by_id(account_id).await?;
        Ok(account.map(|account| Recipient {
            name: account.name,
            email: account.email,
        }))
    }
}

pub async fn run(config: AppConfig) -> Result<()> {
    let db = Arc::new(connect(&config).await?);
    migrate(&db).await?;

    // Repositories
    let users_repo = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let resets_repo = Arc::new(SeaOrmPasswordResetsRepository::new(db.clone()));
    let addresses_repo = Arc::new(SeaOrmAddressesRepository::new(db.clone()));
    let segments_repo = Arc::new(SeaOrmSegmentsRepository::new(db.clone()));
    let stores_repo = Arc::new(SeaOrmStoresRepository::new(db.clone()));

    // Notification worker
    let directory = Arc::new(UsersDirectory {
        users: users_repo.clone(),
    });
    let mail = Arc::new(HttpMailClient::new(
        config.notifier.api_url.clone(),
        config.notifier.api_key.clone(),
    ));
    let notifications = Arc::new(notification_service::domain::Service::new(
        directory,
        mail,
        config.notifier.clone(),
    )?);
    let (dispatcher, worker) = QueueDispatcher::new(notifications);
    tokio::spawn(worker.run());
    let dispatcher: Arc<dyn NotificationDispatcher> = Arc::new(dispatcher);

    // Domain services
    let addresses = Arc::new(address_service::domain::Service::new(addresses_repo));
    let accounts = Arc::new(account_service::domain::Service::new(
        users_repo,
        resets_repo,
        addresses.clone(),
        dispatcher,
        config.account.clone(),
    ));
    let stores = Arc::new(store_service::domain::Service::new(
        segments_repo,
        stores_repo,
        addresses.clone(),
    ));

    let auth_config = Arc::new(config.auth.clone());
    let limits = Arc::new(config.pagination.clone());

    // Router assembly
    let router = Router::new()
        .route("/", get(root))
        .route("/health-check", get(health_check));
    let router = account_service::api::rest::register_routes(
        router,
        accounts.clone(),
        addresses.clone(),
        auth_config.clone(),
        limits.clone(),
    );
    let router = store_service::api::rest::register_routes(
        router,
        stores,
        accounts,
        auth_config,
        limits,
    );
    let router = router.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    info!(%addr, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "application": format!("Mercato - {}", env!("CARGO_PKG_VERSION")),
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
