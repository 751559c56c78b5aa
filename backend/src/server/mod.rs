//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use sky_backend::Trace;
#[cfg(debug_assertions)]
use sky_backend::doc::ApiDoc;
use sky_backend::domain::DishService;
use sky_backend::inbound::http::dishes::{create_dish, delete_dishes, page_dishes};
use sky_backend::inbound::http::health::{HealthState, live, ready};
use sky_backend::inbound::http::state::HttpState;
use sky_backend::outbound::persistence::{DbPool, DieselDishRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the dish service onto the Diesel repository.
fn build_http_state(pool: DbPool) -> HttpState {
    let repository = Arc::new(DieselDishRepository::new(pool));
    let service = Arc::new(DishService::new(repository, Arc::new(DefaultClock)));
    HttpState::new(service.clone(), service)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(create_dish)
        .service(page_dishes)
        .service(delete_dishes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server bound to the configured address.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
    pool: DbPool,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(pool));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind((settings.host(), settings.port()))?
    .run();

    health_state.mark_ready();
    Ok(server)
}
