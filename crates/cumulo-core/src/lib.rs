//! # Cumulo
//!
//! `cumulo-core` binds a cloud provider's image-management API into an
//! embedded [Rhai](https://rhai.rs/) scripting environment, so automation
//! scripts can drive host-native API calls as if they were plain script
//! functions:
//!
//! ```rhai
//! let ubuntu = images::get("ubuntu-24-04-x64");
//! images::update(#{ id: ubuntu.id, name: "golden-base" });
//! for img in images::list_user() {
//!     print(`${img.id} ${img.name}`);
//! }
//! ```
//!
//! ## Core Features
//!
//! *   **Value Marshalling**: Dynamic script arguments (ids, slugs, whole
//!     records) are coerced into typed API values with script-visible errors
//!     on shape mismatches.
//! *   **Pagination Flattening**: Cursor-paginated listing endpoints are
//!     driven to exhaustion and returned to the script as one ordered array.
//! *   **Pluggable Backend**: All remote calls go through the
//!     [`ImagesService`] trait; transport, auth and retries live in the
//!     implementation, not here.
//! *   **Fixture Catalog**: [`catalog::ImageCatalog`] is an in-memory
//!     backend for tests, demos and dry runs.
//!
//! ## Usage
//!
//! ```rust
//! use cumulo_core::{catalog::ImageCatalog, scripting::register_cloud_api};
//! use rhai::Engine;
//! use std::sync::Arc;
//!
//! let mut engine = Engine::new();
//! register_cloud_api(&mut engine, Arc::new(ImageCatalog::sample()));
//!
//! let names = engine
//!     .eval::<rhai::Array>(r#"images::list().map(|img| img.name)"#)
//!     .unwrap();
//! assert!(!names.is_empty());
//! ```

/// In-memory fixture backend.
pub mod catalog;

pub mod errors;

/// Rhai scripting API bindings.
pub mod scripting;

/// Shared data structures for the API surface.
pub mod types;

pub use catalog::ImageCatalog;
pub use errors::ApiError;
pub use types::{Image, ImageRef, ImageUpdate, ListOptions, Page, DEFAULT_PER_PAGE};

/// The image-management operations consumed by the scripting bindings.
///
/// This is the seam between the binding layer and the actual provider: an
/// implementation may speak HTTP to a real cloud API, serve fixtures from
/// memory, or record calls for tests. Every method blocks until the provider
/// answers; the scripting layer is fully synchronous and drives paginated
/// listings to completion within a single script call.
pub trait ImagesService: Send + Sync {
    /// List one page of all images visible to the account.
    fn list(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError>;

    /// List one page of provider base distribution images.
    fn list_distribution(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError>;

    /// List one page of provider one-click application images.
    fn list_application(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError>;

    /// List one page of user-created images (snapshots, backups, customs).
    fn list_user(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError>;

    /// Fetch a single image by numeric id.
    ///
    /// Returns [`ApiError::NotFound`] if no image has that id.
    fn get_by_id(&self, id: u64) -> Result<Image, ApiError>;

    /// Fetch a single image by slug.
    ///
    /// Returns [`ApiError::NotFound`] if no image has that slug.
    fn get_by_slug(&self, slug: &str) -> Result<Image, ApiError>;

    /// Apply an update to the image with the given id and return the updated
    /// record.
    fn update(&self, id: u64, update: &ImageUpdate) -> Result<Image, ApiError>;

    /// Delete the image with the given id.
    fn delete(&self, id: u64) -> Result<(), ApiError>;
}
