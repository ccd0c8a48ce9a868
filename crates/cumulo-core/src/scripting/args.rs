//! # Argument Coercion
//!
//! Turns dynamic script arguments into typed API values.
//!
//! ## Responsibilities
//! - **Identifier Coercion**: `image_id`, `image_slug`, `image_ref` accept a
//!   bare value or a whole image record and resolve one lookup form.
//! - **Update Coercion**: `image_update` reads the mutable fields out of a
//!   script-supplied record.
//!
//! Probing order is fixed: a numeric argument is checked before a string,
//! and both before a record's fields; inside a record, `id` wins over
//! `slug`. On a shape mismatch every function returns a script error
//! immediately; callers never see a placeholder value.

use rhai::{Dynamic, EvalAltResult, Map};

use crate::types::{ImageRef, ImageUpdate};

/// Coerce an argument into an image id.
///
/// Accepts a non-negative integer or an image record whose `id` entry is one.
pub fn image_id(value: &Dynamic) -> Result<u64, Box<EvalAltResult>> {
    if let Ok(id) = value.as_int() {
        return id_from_int(id);
    }
    if let Some(map) = value.clone().try_cast::<Map>() {
        if let Some(id) = map.get("id").and_then(|v| v.as_int().ok()) {
            return id_from_int(id);
        }
    }
    Err("argument must be an Image or an ImageID".into())
}

/// Coerce an argument into an image slug.
///
/// Accepts a string or an image record whose `slug` entry is one.
pub fn image_slug(value: &Dynamic) -> Result<String, Box<EvalAltResult>> {
    if let Ok(slug) = value.clone().into_string() {
        return Ok(slug);
    }
    if let Some(map) = value.clone().try_cast::<Map>() {
        if let Some(slug) = map.get("slug").and_then(|v| v.clone().into_string().ok()) {
            return Ok(slug);
        }
    }
    Err("argument must be an Image or an ImageSlug".into())
}

/// Resolve an argument into exactly one lookup form for `get`.
///
/// Probes in order: number, string, record `id`, record `slug`. A record
/// carrying both resolves by id. Once a form is chosen, its coercion is
/// shared with [`image_id`] and [`image_slug`].
pub fn image_ref(value: &Dynamic) -> Result<ImageRef, Box<EvalAltResult>> {
    if value.is_int() {
        return Ok(ImageRef::ById(image_id(value)?));
    }
    if value.is_string() {
        return Ok(ImageRef::BySlug(image_slug(value)?));
    }
    if let Some(map) = value.clone().try_cast::<Map>() {
        if map.get("id").map_or(false, |v| v.is_int()) {
            return Ok(ImageRef::ById(image_id(value)?));
        }
        if map.get("slug").map_or(false, |v| v.is_string()) {
            return Ok(ImageRef::BySlug(image_slug(value)?));
        }
    }
    Err("argument must be an Image, an ImageID or an ImageSlug".into())
}

/// Build an update request from a script-supplied image record.
///
/// The argument must be a record; a missing `name` entry yields an empty
/// string rather than an error, leaving it to the backend whether an empty
/// rename is acceptable.
pub fn image_update(value: &Dynamic) -> Result<ImageUpdate, Box<EvalAltResult>> {
    let map = value
        .clone()
        .try_cast::<Map>()
        .ok_or("argument must be an Image record")?;
    let name = map
        .get("name")
        .and_then(|v| v.clone().into_string().ok())
        .unwrap_or_default();
    Ok(ImageUpdate { name })
}

/// Script integers are signed; ids are not.
fn id_from_int(id: i64) -> Result<u64, Box<EvalAltResult>> {
    u64::try_from(id).map_err(|_| "argument must be an Image or an ImageID".into())
}
