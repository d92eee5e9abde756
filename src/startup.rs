use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::FormSettings;
use crate::email_client::EmailSender;
use crate::form_fields::MAX_FORM_BYTES;
use crate::routes;

pub fn run(
    listener: TcpListener,
    email_sender: Arc<dyn EmailSender>,
    form_settings: FormSettings,
) -> Result<Server, std::io::Error> {
    let email_sender: Data<dyn EmailSender> = Data::from(email_sender);
    let form_settings = Data::new(form_settings);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(routes::health_check))
            .service(
                web::resource("/")
                    .route(web::post().to(routes::submit_form))
                    .default_service(web::to(routes::method_not_allowed)),
            )
            .app_data(email_sender.clone())
            .app_data(form_settings.clone())
            .app_data(web::FormConfig::default().limit(MAX_FORM_BYTES))
    })
    .listen(listener)?
    .run();
    Ok(server)
}
