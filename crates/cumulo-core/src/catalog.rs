//! # Image Catalog
//!
//! An in-memory [`ImagesService`] backed by a plain `Vec<Image>`.
//!
//! ## Responsibilities
//! - **Honest Pagination**: Listings slice the catalog per [`ListOptions`] and
//!   report `has_more` from what is actually left, so the scripting layer's
//!   page loop can be exercised without a network in sight.
//! - **Origin Filters**: The `distribution` / `application` / `user` listings
//!   filter on [`Image::kind`] exactly like the remote API's `type` filter.
//! - **Mutation**: `update` and `delete` edit the backing vector in place,
//!   which keeps repeated script runs against one catalog coherent.
//!
//! Catalogs come from three places: [`ImageCatalog::new`] for tests,
//! [`ImageCatalog::sample`] for demos, and [`ImageCatalog::from_json_file`]
//! for user-supplied fixtures.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use tracing::instrument;

use crate::errors::ApiError;
use crate::types::{Image, ImageUpdate, ListOptions, Page};
use crate::ImagesService;

/// An in-memory image store implementing [`ImagesService`].
#[derive(Debug)]
pub struct ImageCatalog {
    images: Mutex<Vec<Image>>,
}

impl ImageCatalog {
    /// Creates a catalog over the given images, kept in the given order.
    pub fn new(images: Vec<Image>) -> Self {
        Self {
            images: Mutex::new(images),
        }
    }

    /// Loads a catalog from a JSON file containing an array of images.
    #[instrument(level = "debug", fields(path = %path.display()))]
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read image catalog {}", path.display()))?;
        let images: Vec<Image> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse image catalog {}", path.display()))?;
        Ok(Self::new(images))
    }

    /// A small built-in catalog with every origin kind represented.
    pub fn sample() -> Self {
        let base = |id: u64, name: &str, kind: &str| Image {
            id,
            name: name.into(),
            kind: kind.into(),
            distribution: String::new(),
            slug: None,
            public: false,
            regions: Vec::new(),
            min_disk_size: 15,
            created_at: Utc.with_ymd_and_hms(2024, 4, 23, 8, 0, 0).unwrap(),
        };
        Self::new(vec![
            Image {
                distribution: "Ubuntu".into(),
                slug: Some("ubuntu-24-04-x64".into()),
                public: true,
                regions: vec!["nyc3".into(), "ams3".into(), "sgp1".into()],
                ..base(6_918_990, "24.04 (LTS) x64", "distribution")
            },
            Image {
                distribution: "Debian".into(),
                slug: Some("debian-12-x64".into()),
                public: true,
                regions: vec!["nyc3".into(), "fra1".into()],
                ..base(6_372_321, "12 x64", "distribution")
            },
            Image {
                distribution: "Ubuntu".into(),
                slug: Some("docker-24-04".into()),
                public: true,
                regions: vec!["nyc3".into(), "ams3".into()],
                min_disk_size: 20,
                ..base(7_555_620, "Docker on Ubuntu 24.04", "application")
            },
            Image {
                distribution: "Ubuntu".into(),
                regions: vec!["nyc3".into()],
                min_disk_size: 25,
                ..base(22_662_611, "web-01 2024-04-22", "snapshot")
            },
            Image {
                distribution: "Debian".into(),
                regions: vec!["fra1".into()],
                min_disk_size: 40,
                ..base(22_662_612, "db-primary 2024-04-22", "snapshot")
            },
        ])
    }

    /// Number of images currently in the catalog.
    pub fn len(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Slices the images passing `keep` down to the requested page.
///
/// `has_more` reports whether any matching image exists past the window, which
/// is what drives the scripting layer's page loop.
fn page_of(images: &[Image], keep: impl Fn(&Image) -> bool, opts: &ListOptions) -> Page<Image> {
    let start = opts.page.saturating_sub(1).saturating_mul(opts.per_page);
    let start = usize::try_from(start).unwrap_or(usize::MAX);
    let per_page = usize::try_from(opts.per_page).unwrap_or(usize::MAX);

    let mut matching = images.iter().filter(|img| keep(img));
    let items: Vec<Image> = matching.by_ref().skip(start).take(per_page).cloned().collect();
    Page {
        items,
        has_more: matching.next().is_some(),
    }
}

impl ImagesService for ImageCatalog {
    fn list(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError> {
        let images = self.images.lock().unwrap();
        Ok(page_of(&images, |_| true, opts))
    }

    fn list_distribution(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError> {
        let images = self.images.lock().unwrap();
        Ok(page_of(&images, Image::is_distribution, opts))
    }

    fn list_application(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError> {
        let images = self.images.lock().unwrap();
        Ok(page_of(&images, Image::is_application, opts))
    }

    fn list_user(&self, opts: &ListOptions) -> Result<Page<Image>, ApiError> {
        let images = self.images.lock().unwrap();
        Ok(page_of(&images, Image::is_user, opts))
    }

    fn get_by_id(&self, id: u64) -> Result<Image, ApiError> {
        let images = self.images.lock().unwrap();
        images
            .iter()
            .find(|img| img.id == id)
            .cloned()
            .ok_or_else(|| ApiError::image_not_found(id))
    }

    fn get_by_slug(&self, slug: &str) -> Result<Image, ApiError> {
        let images = self.images.lock().unwrap();
        images
            .iter()
            .find(|img| img.slug.as_deref() == Some(slug))
            .cloned()
            .ok_or_else(|| ApiError::image_not_found(slug))
    }

    fn update(&self, id: u64, update: &ImageUpdate) -> Result<Image, ApiError> {
        if update.name.is_empty() {
            return Err(ApiError::InvalidRequest("image name cannot be empty".into()));
        }
        let mut images = self.images.lock().unwrap();
        let image = images
            .iter_mut()
            .find(|img| img.id == id)
            .ok_or_else(|| ApiError::image_not_found(id))?;
        image.name = update.name.clone();
        Ok(image.clone())
    }

    fn delete(&self, id: u64) -> Result<(), ApiError> {
        let mut images = self.images.lock().unwrap();
        let index = images
            .iter()
            .position(|img| img.id == id)
            .ok_or_else(|| ApiError::image_not_found(id))?;
        images.remove(index);
        Ok(())
    }
}
