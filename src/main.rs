pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::auth;
pub use modules::email;
pub use modules::multimedia;

use crate::auth::adapter::outgoing::account_repository_postgres::AccountRepositoryPostgres;
use crate::auth::adapter::outgoing::security::{BcryptHasher, RandomTokenIssuer};
use crate::auth::application::orchestrator::account_registration::AccountRegistrationOrchestrator;
use crate::auth::application::use_cases::{
    create_account::{CreateAccountUseCase, ICreateAccountUseCase},
    verify_account_email::{IVerifyAccountEmailUseCase, VerifyAccountEmailUseCase},
};

use crate::config::{AppConfig, SmtpSettings};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;
use crate::email::application::services::UserEmailService;
use crate::multimedia::adapter::incoming::web::uploads_service;
use crate::multimedia::adapter::outgoing::LocalFileStorage;
use crate::multimedia::application::ports::outgoing::FileStorage;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_account_orchestrator: Arc<AccountRegistrationOrchestrator>,
    pub verify_account_email_use_case: Arc<dyn IVerifyAccountEmailUseCase + Send + Sync>,
    pub profile_picture_storage: Arc<dyn FileStorage + Send + Sync>,
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!(error = %e, "{context}");
    io::Error::other(format!("{context}: {e}"))
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    info!(environment = %config.environment, "Configuration loaded");

    // Configure connection pool
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db = Arc::new(
        Database::connect(opt)
            .await
            .map_err(|e| startup_error("Failed to connect to database", e))?,
    );
    info!("Database connected");

    // Email
    let email_sender = match &config.smtp {
        SmtpSettings::Relay {
            server,
            username,
            password,
        } => SmtpEmailSender::new(server, username, password, &config.email_from)
            .map_err(|e| startup_error("Failed to configure SMTP relay", e))?,
        SmtpSettings::Local { host, port } => {
            info!(%host, port, "Using local SMTP server");
            SmtpEmailSender::new_local(host, *port, &config.email_from)
        }
    };
    let user_email_notifier: Arc<dyn UserEmailNotifier + Send + Sync> = Arc::new(
        UserEmailService::new(Arc::new(email_sender), &config.base_url),
    );

    // Uploads
    let file_storage = Arc::new(
        LocalFileStorage::new(config.upload_dir.clone())
            .await
            .map_err(|e| startup_error("Failed to prepare upload directory", e))?,
    );

    // Auth
    let account_repository = AccountRepositoryPostgres::new(Arc::clone(&db));

    let create_account_use_case: Arc<dyn ICreateAccountUseCase + Send + Sync> =
        Arc::new(CreateAccountUseCase::new(
            account_repository.clone(),
            Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            Arc::new(RandomTokenIssuer),
            file_storage.clone(),
        ));
    let verify_account_email_use_case: Arc<dyn IVerifyAccountEmailUseCase + Send + Sync> =
        Arc::new(VerifyAccountEmailUseCase::new(account_repository));

    let register_account_orchestrator = Arc::new(AccountRegistrationOrchestrator::new(
        create_account_use_case,
        user_email_notifier,
    ));

    let state = AppState {
        register_account_orchestrator,
        verify_account_email_use_case,
        profile_picture_storage: file_storage,
    };

    let server_url = config.server_url();
    let upload_dir = config.upload_dir.clone();
    info!("Starting server at {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db)))
            .configure(|cfg| init_routes(cfg, &upload_dir))
    })
    .bind(server_url)?
    .run()
    .await
}

fn init_routes(cfg: &mut web::ServiceConfig, upload_dir: &Path) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_account_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_email_handler);
    // Docs
    cfg.service(crate::api::openapi::swagger_ui());
    // Static profile pictures
    cfg.service(uploads_service(upload_dir));
}

fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
