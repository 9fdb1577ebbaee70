use beskar_api::configuration::{get_settings, DatabaseSettings};
use beskar_api::startup::{get_connection_pool, Application};
use beskar_api::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub email_server: MockServer,
    pub support_email: String,
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contacts(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(&format!("{}/api/contacts", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn stored_contact_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count stored contacts.")
    }
}

// Launch our application in the background ~somehow~
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    // Stand-in for the transactional email provider.
    let email_server = MockServer::start().await;

    let settings = {
        let mut configuration = get_settings().expect("Failed to read config.toml");
        configuration.database.database_name = Uuid::new_v4().to_string();
        configuration.application.port = 0; // Random OS port
        configuration.email_client.base_url = email_server.uri();
        configuration.email_client.api_key = Some(Secret::new("test-api-key".to_string()));
        configuration
    };
    configure_database(&settings.database).await;

    let application = Application::build(settings.clone())
        .await
        .expect("Failed to build application");

    let address = format!("http://127.0.0.1:{}", application.port());

    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        db_pool: get_connection_pool(&settings.database),
        email_server,
        support_email: settings.email_client.support_email,
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("Failed to connect to the database");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database");

    let connection_pool = PgPool::connect_with(config.with_db())
        .await
        .expect("Failed to connect to the database");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to run migrations");

    connection_pool
}
