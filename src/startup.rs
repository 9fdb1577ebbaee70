use crate::configuration::{DatabaseSettings, Settings};
use crate::domain::ContactEmail;
use crate::email_client::EmailClient;
use crate::routes::{get_contacts, get_support_email, health_check, submit_contact};
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let support_email = configuration
            .email_client
            .support()
            .map_err(|e| anyhow::anyhow!("Invalid support email address: {}", e))?;
        let email_client = configuration.email_client.client();

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );

        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            get_connection_pool(&configuration.database),
            email_client,
            support_email,
        )?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(
            settings.pool_timeout_seconds,
        ))
        .connect_lazy_with(settings.with_db())
}

/// Fixed destination mailbox for contact notifications.
pub struct SupportEmail(pub ContactEmail);

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    email_client: EmailClient,
    support_email: ContactEmail,
) -> Result<Server, anyhow::Error> {
    let connection = web::Data::new(db_pool);
    let email_client = Data::new(email_client);
    let support_email = Data::new(SupportEmail(support_email));
    let server = HttpServer::new(move || {
        App::new()
            // Middleware
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .route("/contact", web::post().to(submit_contact))
                    .route("/contacts", web::get().to(get_contacts))
                    .route("/support-email", web::get().to(get_support_email)),
            )
            .app_data(connection.clone())
            .app_data(email_client.clone())
            .app_data(support_email.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
