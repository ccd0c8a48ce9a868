//! # Scripting Module
//!
//! Rhai bindings for the cloud image-management API.
//!
//! ## Responsibilities
//! - **Engine Setup**: Registers the `images` static module with Rhai.
//! - **Marshalling**: Coerces dynamic script arguments into typed API values
//!   and projects typed records back into script maps.
//! - **Pagination**: Flattens cursor-paginated listings into one script
//!   array per call.
//!
//! ## Pattern
//! Every operation is a native function returning
//! `Result<T, Box<EvalAltResult>>`; an `Err` surfaces in the script as a
//! runtime error carrying the failure's message text, and nothing is retried
//! or partially returned.
//!
//! ## Module Structure
//! - `args`: Dynamic-argument coercion helpers.
//! - `images`: The `images` service facade, record projection and listing
//!   flattener.

pub mod args;
mod images;

pub use images::{image_to_map, images_module, list_all};

use crate::errors::ApiError;
use crate::ImagesService;
use rhai::{Engine, EvalAltResult};
use std::sync::Arc;
use tracing::error;

/// Registers the cloud API into the provided Rhai `Engine`.
///
/// This exposes the `images` static module, so scripts can call
/// `images::list()`, `images::get(...)` and friends. Binding happens once
/// here; the module is immutable afterward and the service handle is shared
/// by every operation closure.
pub fn register_cloud_api(engine: &mut Engine, service: Arc<dyn ImagesService>) {
    let images = images_module(service);
    engine.register_static_module("images", images.into());
}

/// Translate a service failure into a script error, keeping its message.
pub(crate) fn service_error(err: ApiError) -> Box<EvalAltResult> {
    error!("images service call failed: {}", err);
    err.to_string().into()
}
