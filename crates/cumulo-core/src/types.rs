//! # Types Module
//!
//! Shared data types for the image management API surface.
//!
//! ## Responsibilities
//! - **Image**: The full image record returned by lookup, listing and update
//!   operations.
//! - **ImageRef**: The resolved form of a script-supplied image reference.
//! - **Paging**: `ListOptions` cursor and `Page<T>` response envelope.
//!
//! ## Key Types
//! - `Image`: Provider image record (wire model, serde-compatible).
//! - `ImageUpdate`: The mutable subset accepted by the update operation.
//! - `Page<T>`: One page of results plus the "more pages exist" signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size used when driving paginated listings to exhaustion.
///
/// Large on purpose: every listing call fetches all pages before returning to
/// the script, so fewer round trips win over smaller responses.
pub const DEFAULT_PER_PAGE: u64 = 200;

/// A provider image: a bootable disk template for new instances.
///
/// Records are read-only from the script's point of view; every field is
/// projected into the script value space, none are written back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Numeric identifier, unique per provider.
    pub id: u64,
    /// Human-readable display name. The only field the update operation accepts.
    pub name: String,
    /// Provider classification: `"distribution"`, `"application"`, or a
    /// user-created kind such as `"snapshot"`, `"backup"` or `"custom"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Base operating system family, e.g. `"Ubuntu"`.
    pub distribution: String,
    /// Stable mnemonic identifier. Provider-published images carry one;
    /// user-created images usually do not.
    pub slug: Option<String>,
    /// Whether the image is visible to all accounts.
    pub public: bool,
    /// Region slugs where the image is available.
    pub regions: Vec<String>,
    /// Minimum disk size in GB required to use the image.
    pub min_disk_size: u64,
    /// When the image was created on the provider.
    pub created_at: DateTime<Utc>,
}

impl Image {
    /// Whether this is a provider-published base distribution image.
    pub fn is_distribution(&self) -> bool {
        self.kind == "distribution"
    }

    /// Whether this is a provider-published one-click application image.
    pub fn is_application(&self) -> bool {
        self.kind == "application"
    }

    /// User-created images are everything the provider did not publish.
    pub fn is_user(&self) -> bool {
        !self.is_distribution() && !self.is_application()
    }
}

/// The mutable subset of an [`Image`] accepted by the update operation.
///
/// Built fresh from the script-supplied record on every call; it never
/// aliases the record it was read from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUpdate {
    /// New display name for the image.
    pub name: String,
}

/// A script-supplied image reference, resolved to exactly one lookup form.
///
/// Scripts may pass a bare id, a bare slug, or a whole image record; the
/// coercion layer probes in a fixed order (number, then string, then record
/// `id`, then record `slug`) so each call resolves one unambiguous form.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageRef {
    /// Look up by numeric id.
    ById(u64),
    /// Look up by slug.
    BySlug(String),
}

/// Cursor for one paginated listing pass.
///
/// Created fresh per listing call, bumped once per fetched page, and
/// discarded when the call returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    /// 1-based page number.
    pub page: u64,
    /// Records per page.
    pub per_page: u64,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of listing results plus its link metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records in service order.
    pub items: Vec<T>,
    /// Whether the service has further pages past this one. Termination of
    /// the flattening loop relies entirely on this signal.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// A final page carrying everything at once.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_more: false,
        }
    }
}
