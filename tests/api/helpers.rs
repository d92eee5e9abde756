use form_relay::configuration::{get_configuration, Settings};
use form_relay::email_client::build_email_sender;
use form_relay::startup::run;
use form_relay::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::net::TcpListener;
use wiremock::MockServer;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
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

pub const ORIGIN: &str = "https://chinabusinesshub.com";

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub recipient_email: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_form<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize + ?Sized,
    {
        self.api_client
            .post(&format!("{}/", &self.address))
            .header("Origin", ORIGIN)
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_form_without_origin<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize + ?Sized,
    {
        self.api_client
            .post(&format!("{}/", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_multipart(&self, form: reqwest::multipart::Form) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/", &self.address))
            .header("Origin", ORIGIN)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw(&self, content_type: &str, body: impl Into<reqwest::Body>) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/", &self.address))
            .header("Origin", ORIGIN)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Launch the application on a random port, pointed at a mock email
/// provider, after letting the caller adjust its configuration.
pub async fn spawn_app_with<F>(customise: F) -> TestApp
where
    F: FnOnce(&mut Settings),
{
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let mut config = get_configuration().expect("Failed to read config file");
    config.email_client.base_url = email_server.uri();
    config.email_client.api_key = Some(Secret::new("re_test_key".to_string()));
    config.email_client.timeout_milliseconds = 500;
    customise(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // We retrieve the port assigned to us by the OS
    let port = listener.local_addr().unwrap().port();

    let email_sender =
        build_email_sender(&config.email_client).expect("Invalid email client configuration");
    let server = run(listener, email_sender, config.form).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        email_server,
        recipient_email: config.email_client.recipient_email,
        api_client,
    }
}

pub fn assert_redirects_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}
