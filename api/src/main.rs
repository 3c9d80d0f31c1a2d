use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use auth_core::repositories::{TokenRepository, UserRepository};
use auth_core::services::auth::AuthService;
use auth_core::services::token::{CachedKeyStore, KeyProvider, KeySource, TokenConfig, TokenService};
use auth_infra::database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
use auth_shared::config::AppConfig;

use auth_api::app::{configure_routes, AppState};
use auth_api::middleware::cors::create_cors;
use auth_api::middleware::{JwtAuth, JwtRefresh};

/// How often expired refresh token records are swept from the store
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting auth service");

    let config = AppConfig::from_env();

    // Key material is provisioned out of band; missing or malformed
    // files abort startup.
    let key_provider = Arc::new(KeyProvider::from_files(
        &config.jwt.private_key_path,
        &config.jwt.jwks_path,
        &config.jwt.kid,
    )?);

    let pool = DatabasePool::new(&config.database).await?;

    let user_repository: Arc<dyn UserRepository> =
        Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let token_repository: Arc<dyn TokenRepository> =
        Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));

    let token_service = Arc::new(TokenService::new(
        token_repository,
        Arc::clone(&key_provider),
        TokenConfig::from(&config.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&token_service),
    ));
    let key_source: Arc<dyn KeySource> = key_provider.clone();
    let key_store = Arc::new(CachedKeyStore::new(key_source));

    spawn_record_cleanup(Arc::clone(&token_service));

    let issuer = config.jwt.issuer.clone();
    let cookie_config = config.cookie.clone();
    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    HttpServer::new(move || {
        let state = AppState {
            auth_service: Arc::clone(&auth_service),
            key_provider: Arc::clone(&key_provider),
            cookie_config: cookie_config.clone(),
        };
        let jwt_auth = JwtAuth::new(Arc::clone(&key_store), issuer.clone());
        let jwt_refresh = JwtRefresh::new(Arc::clone(&token_service));

        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(state))
            .configure(configure_routes(jwt_auth, jwt_refresh))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

/// Periodically deletes expired refresh token records.
///
/// Revocation does not depend on this sweep; it only keeps the table from
/// accumulating rows for grants that can no longer verify.
fn spawn_record_cleanup(token_service: Arc<TokenService>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        interval.tick().await; // first tick fires immediately

        loop {
            interval.tick().await;
            match token_service.cleanup_expired().await {
                Ok(0) => {}
                Ok(deleted) => info!("removed {} expired refresh token records", deleted),
                Err(e) => warn!("expired record cleanup failed: {}", e),
            }
        }
    });
}
