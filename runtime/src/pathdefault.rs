//! Pathdefault implements the Path Defaulter: filling in a `path` annotation for output items
//! that don't already carry one.

use api::Document;
use tracing::trace;

use crate::util::scope_dir;

/// Apply sets a default `path` annotation on every item in `items` that lacks one, using the
/// function config's scope directory (if any) as a prefix. Items that already carry a `path`
/// annotation, or that lack enough identity (`kind`/`name`) to build a default, are left alone.
pub fn apply(items: &mut [Document], function_config: &Document) {
    let dir = scope_dir(function_config.path().as_deref()).unwrap_or_default();

    for item in items.iter_mut() {
        if item.path().is_some() {
            continue;
        }
        let (Some(kind), Some(name)) = (item.kind(), item.name()) else {
            continue;
        };
        let default = format!("{}_{}.yaml", kind.to_lowercase(), name);
        let path = if dir.is_empty() {
            default
        } else {
            format!("{dir}/{default}")
        };
        trace!(path, "defaulting output path");
        item.set_path(path);
    }
}
