use std::fmt;

use actix_web::{
    http::{Method, StatusCode},
    web::{self, Bytes, Data},
    HttpResponse, ResponseError,
};
use relay::{
    consts::consts::METHOD_NOT_ALLOWED,
    crm::CrmApi,
    model::result::RelayErrorBody,
    relay::{error::RelayError, relay::Relay},
};

pub const SUBMIT_PATH: &str = "/submit";

/// Wraps relay failures so actix can render them, every relay failure is a client error
#[derive(Debug)]
pub struct ApiError(RelayError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.0.to_body())
    }
}

pub fn configure<C: CrmApi + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(SUBMIT_PATH)
            .route(web::post().to(submit::<C>))
            .route(web::method(Method::OPTIONS).to(preflight))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Submission endpoint -- triggered once per form submit
async fn submit<C: CrmApi + 'static>(
    relay: Data<Relay<C>>,
    body: Bytes,
) -> Result<HttpResponse, ApiError> {
    match relay.process(&body).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => {
            log::error!("Lead relay error: {}", e);
            Err(ApiError(e))
        }
    }
}

/// Answers OPTIONS when no CORS layer is wrapped around the app, actix-cors answers preflights itself
async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(RelayErrorBody::new(METHOD_NOT_ALLOWED))
}
