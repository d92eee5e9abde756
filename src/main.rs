use std::net::TcpListener;

use anyhow::Context;
use form_relay::configuration::get_configuration;
use form_relay::email_client::build_email_sender;
use form_relay::startup::run;
use form_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("form-relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration().context("Failed to read configuration")?;
    let email_sender = build_email_sender(&config.email_client)?;

    let address = format!(
        "{address}:{port}",
        address = config.application.host,
        port = config.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(
        %address,
        provider = ?config.email_client.provider,
        form = ?config.form.kind,
        "Accepting form submissions"
    );

    run(listener, email_sender, config.form)?.await?;
    Ok(())
}
