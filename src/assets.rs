//! Image selection with existence checks.
//!
//! Whether an asset exists is an external, fallible lookup; any failure counts
//! as "missing" and the caller gets the fallback path instead.

use crate::catalog::{DEFAULT_SERVICE_IMAGE, ServiceDefinition};
use std::path::PathBuf;

pub trait AssetProbe {
    /// `public_path` is the URL path, e.g. `/images/services/blog-og.jpg`.
    fn exists(&self, public_path: &str) -> bool;
}

/// Looks assets up under a static `public/` directory.
#[derive(Debug, Clone)]
pub struct FsAssetProbe {
    public_root: PathBuf,
}

impl FsAssetProbe {
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
        }
    }
}

impl AssetProbe for FsAssetProbe {
    fn exists(&self, public_path: &str) -> bool {
        let relative = public_path.trim_start_matches('/');
        if relative.is_empty() || relative.split('/').any(|part| part == "..") {
            return false;
        }
        self.public_root.join(relative).is_file()
    }
}

/// `path` when the probe finds it, `fallback` otherwise.
pub fn verified_image(probe: &dyn AssetProbe, path: &str, fallback: &str) -> String {
    if probe.exists(path) {
        path.to_string()
    } else {
        fallback.to_string()
    }
}

/// Hero image for a detail page: the per-service image, then the
/// subcategory illustration, then the shared default.
pub fn hero_image(probe: &dyn AssetProbe, service: &ServiceDefinition) -> String {
    let specific = format!("/images/services/{}-og.jpg", service.id);
    let illustration = service.sub_category.style().illustration;
    if probe.exists(&specific) {
        return specific;
    }
    verified_image(probe, illustration, DEFAULT_SERVICE_IMAGE)
}
