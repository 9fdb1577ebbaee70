use beskar_api::configuration::get_settings;
use beskar_api::startup::Application;
use beskar_api::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("beskar-api".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);
    let configuration = get_settings().expect("Failed to read configuration file");
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
