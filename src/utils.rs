use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;

pub fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}
