//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DishCommand, DishQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dishes: Arc<dyn DishCommand>,
    pub dishes_query: Arc<dyn DishQuery>,
}

impl HttpState {
    /// Construct state from the dish ports.
    ///
    /// A single service usually backs both ports:
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use sky_backend::domain::DishService;
    /// use sky_backend::domain::ports::DishRepository;
    /// use sky_backend::inbound::http::state::HttpState;
    ///
    /// fn build(repository: Arc<dyn DishRepository>) -> HttpState {
    ///     let service = Arc::new(DishService::new(repository, Arc::new(DefaultClock)));
    ///     HttpState::new(service.clone(), service)
    /// }
    /// ```
    pub fn new(dishes: Arc<dyn DishCommand>, dishes_query: Arc<dyn DishQuery>) -> Self {
        Self {
            dishes,
            dishes_query,
        }
    }
}
