use std::io::ErrorKind;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::{DefaultHeaders, Next};
use actix_web::{web, Error, HttpResponse};
use log::{debug, error};

use crate::constants::{OUTPUT_FILE_NAME, SUB_INFO_HEADER};
use crate::interfaces::converter::refresh_claimed;
use crate::models::AppState;

/// Headers attached to every response
pub fn default_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Content-Disposition", "inline"))
}

/// Echoes the last subscription metadata header on every response
///
/// Clients such as Clash Verge read quota and expiry from it.
pub async fn sub_info_header(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let header = req
        .app_data::<web::Data<Arc<AppState>>>()
        .map(|state| state.sub_header())
        .unwrap_or_default();

    let mut res = next.call(req).await?;
    if !header.is_empty() {
        match HeaderValue::from_str(&header) {
            Ok(value) => {
                res.headers_mut()
                    .insert(HeaderName::from_static(SUB_INFO_HEADER), value);
            }
            Err(e) => debug!("Metadata header not echoed: {}", e),
        }
    }
    Ok(res)
}

/// Handler serving the cleaned document
pub async fn config_handler(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    let path = app_state.settings().output_file();
    match tokio::fs::read(&path).await {
        Ok(content) => HttpResponse::Ok()
            .content_type("text/yaml; charset=utf-8")
            .body(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            HttpResponse::NotFound().body("Config has not been generated yet")
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            HttpResponse::InternalServerError().body(format!("Failed to read config: {}", e))
        }
    }
}

/// Handler returning the last known subscription metadata as JSON
pub async fn info_handler(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(app_state.sub_info())
}

/// Handler starting a background conversion of the configured URL
pub async fn refresh_handler(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    if app_state.settings().url.trim().is_empty() {
        return HttpResponse::BadRequest().body("No subscription URL configured");
    }
    let Some(guard) = app_state.try_begin_conversion() else {
        return HttpResponse::Conflict().body("A conversion is already running");
    };

    let state = Arc::clone(app_state.get_ref());
    actix_web::rt::spawn(async move {
        if let Err(e) = refresh_claimed(&state, guard).await {
            error!("Conversion failed: {}", e);
        }
    });
    HttpResponse::Accepted().body("Conversion started")
}

/// Register the endpoints with Actix Web
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route(&format!("/{}", OUTPUT_FILE_NAME), web::get().to(config_handler))
        .route("/info", web::get().to(info_handler))
        .route("/refresh", web::get().to(refresh_handler))
        .route("/", web::get().to(|| async { "clash-cleaner is running" }));
}
