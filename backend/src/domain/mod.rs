//! Domain primitives, services, and ports.
//!
//! Purpose: define the dish types the API and persistence layers exchange,
//! the use-cases operating on them, and the error taxonomy every operation
//! reports through. Types here know nothing about HTTP or SQL.
//!
//! Public surface:
//! - Error: tagged failure (business rule, persistence, or unrecognised).
//! - BusinessError / PersistenceError / SqlState: the error payloads.
//! - Dish value types (`NewDish`, `DishSummary`, `DishPageQuery`, ...).
//! - DishService: implementation of the dish command and query ports.

pub mod dish;
pub mod dish_service;
pub mod error;
pub mod ports;

pub use self::dish::{
    CategoryId, DishId, DishPageQuery, DishStatus, DishSummary, NewDish, NewDishFlavor,
    UnknownDishStatus,
};
pub use self::dish_service::DishService;
pub use self::error::{
    BusinessError, BusinessErrorValidationError, Error, PersistenceError, SqlState,
};
