use actix_multipart::Multipart;
use actix_web::dev::Payload;
use actix_web::error::{ErrorBadRequest, ErrorPayloadTooLarge};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use futures::StreamExt;

/// Upper bound on the decoded size of a submission, for either encoding.
pub const MAX_FORM_BYTES: usize = 256 * 1024;

/// The `name=value` pairs of a submitted form, in body order, decoded from
/// `application/x-www-form-urlencoded` or `multipart/form-data`.
pub struct FormFields(pub Vec<(String, String)>);

impl FormFields {
    pub fn into_inner(self) -> Vec<(String, String)> {
        self.0
    }
}

impl FromRequest for FormFields {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_multipart(req) {
            let multipart = Multipart::new(req.headers(), payload.take());
            Box::pin(async move { read_multipart(multipart, MAX_FORM_BYTES).await.map(Self) })
        } else {
            let form = web::Form::<Vec<(String, String)>>::from_request(req, payload);
            Box::pin(async move { Ok(Self(form.await?.into_inner())) })
        }
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |content_type| {
            content_type
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

/// Collects the text parts of a multipart body. File parts are read and
/// dropped; a form field never carries one.
async fn read_multipart(
    mut multipart: Multipart,
    limit: usize,
) -> Result<Vec<(String, String)>, actix_web::Error> {
    let mut fields = Vec::new();
    let mut total = 0;
    while let Some(part) = multipart.next().await {
        let mut part = part?;
        let name = part.content_disposition().get_name().map(str::to_string);
        let is_file = part.content_disposition().get_filename().is_some();

        let mut value = Vec::new();
        while let Some(chunk) = part.next().await {
            let chunk = chunk?;
            total += chunk.len();
            if total > limit {
                return Err(ErrorPayloadTooLarge("Form body exceeds the size limit"));
            }
            value.extend_from_slice(&chunk);
        }

        match name {
            Some(name) if !is_file => {
                let value = String::from_utf8(value).map_err(ErrorBadRequest)?;
                fields.push((name, value));
            }
            _ => continue,
        }
    }
    Ok(fields)
}
