//! # Images API
//!
//! The `images` service facade exposed to Rhai scripts.
//!
//! ## Responsibilities
//! - **Operations**: `list`, `list_distribution`, `list_application`,
//!   `list_user`, `get`, `update`, `delete`.
//! - **Projection**: `image_to_map` turns one typed record into a script map
//!   with a fixed field set.
//! - **Flattening**: `list_all` drives a paginated listing to exhaustion and
//!   returns a single ordered array.

use chrono::SecondsFormat;
use rhai::{Array, Dynamic, EvalAltResult, Map, Module};
use std::sync::Arc;
use tracing::debug;

use super::args::{image_id, image_ref, image_update};
use super::service_error;
use crate::errors::ApiError;
use crate::types::{Image, ImageRef, ListOptions, Page};
use crate::ImagesService;

/// Builds the `images` module bound to the given service handle.
///
/// Each operation coerces its arguments, invokes exactly one service method
/// (listings drive [`list_all`]), and projects the result. The handle is
/// captured once per operation; nothing else is shared between calls.
pub fn images_module(service: Arc<dyn ImagesService>) -> Module {
    let mut module = Module::new();

    let svc = service.clone();
    module.set_native_fn("list", move || list_all(|opts| svc.list(opts)));

    let svc = service.clone();
    module.set_native_fn("list_distribution", move || {
        list_all(|opts| svc.list_distribution(opts))
    });

    let svc = service.clone();
    module.set_native_fn("list_application", move || {
        list_all(|opts| svc.list_application(opts))
    });

    let svc = service.clone();
    module.set_native_fn("list_user", move || list_all(|opts| svc.list_user(opts)));

    let svc = service.clone();
    module.set_native_fn("get", move |arg: Dynamic| {
        let image = match image_ref(&arg)? {
            ImageRef::ById(id) => svc.get_by_id(id),
            ImageRef::BySlug(slug) => svc.get_by_slug(&slug),
        }
        .map_err(service_error)?;
        image_to_map(&image)
    });

    let svc = service.clone();
    module.set_native_fn("update", move |arg: Dynamic| {
        // the id and the new field values come from the same record argument
        let id = image_id(&arg)?;
        let update = image_update(&arg)?;
        let image = svc.update(id, &update).map_err(service_error)?;
        image_to_map(&image)
    });

    let svc = service;
    module.set_native_fn("delete", move |arg: Dynamic| {
        let id = image_id(&arg)?;
        svc.delete(id).map_err(service_error)
    });

    module
}

/// Drives a paginated listing to exhaustion, projecting every record.
///
/// Pages are fetched in ascending order starting at 1; records keep the
/// service's in-page order. The first failed fetch aborts the whole call,
/// and nothing accumulated so far is surfaced. Termination relies entirely on
/// the service clearing `has_more`; a service that never does makes the
/// listing spin, which is its contract to keep, not ours.
pub fn list_all(
    fetch: impl Fn(&ListOptions) -> Result<Page<Image>, ApiError>,
) -> Result<Array, Box<EvalAltResult>> {
    let mut opts = ListOptions::default();
    let mut images = Array::new();

    loop {
        let page = fetch(&opts).map_err(service_error)?;
        debug!("fetched image page {} ({} records)", opts.page, page.items.len());

        for image in &page.items {
            images.push(image_to_map(image)?.into());
        }

        if !page.has_more {
            break;
        }
        opts.page += 1;
    }

    Ok(images)
}

/// Projects one image record into a script map.
///
/// The key set is identical for every record, whichever operation produced
/// it: `id`, `name`, `type`, `distribution`, `slug`, `public`, `regions`,
/// `min_disk_size`, `created_at`. A field that cannot be represented in the
/// script value space fails the whole projection with an error naming it.
pub fn image_to_map(image: &Image) -> Result<Map, Box<EvalAltResult>> {
    let mut map = Map::new();
    map.insert("id".into(), script_int(image.id, "id")?.into());
    map.insert("name".into(), image.name.clone().into());
    map.insert("type".into(), image.kind.clone().into());
    map.insert("distribution".into(), image.distribution.clone().into());
    map.insert(
        "slug".into(),
        match &image.slug {
            Some(slug) => slug.clone().into(),
            None => Dynamic::UNIT,
        },
    );
    map.insert("public".into(), image.public.into());
    map.insert("regions".into(), image.regions.clone().into());
    map.insert(
        "min_disk_size".into(),
        script_int(image.min_disk_size, "min_disk_size")?.into(),
    );
    map.insert(
        "created_at".into(),
        image
            .created_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .into(),
    );
    Ok(map)
}

/// Ids are unsigned on the wire; scripts only have signed integers.
fn script_int(value: u64, field: &str) -> Result<i64, Box<EvalAltResult>> {
    i64::try_from(value).map_err(|_| {
        format!(
            "can't convert field {:?}: {} exceeds the script integer range",
            field, value
        )
        .into()
    })
}
