//! Identity implements the Identity Annotator: assigning transient `index` annotations before a
//! function runs and stripping them afterward, unless the caller opts to keep them.

use api::Document;
use tracing::trace;

/// Assign sets `config.kubernetes.io/index` on each document to its position in `items`,
/// overwriting any prior value. Values are `"0".."N-1"` in order.
pub fn assign(items: &mut [Document]) {
    for (i, doc) in items.iter_mut().enumerate() {
        trace!(index = i, kind = doc.kind(), "assigning index annotation");
        doc.set_index(i);
    }
}

/// Strip removes the `index` annotation from each document unless `keep` is set.
pub fn strip(items: &mut [Document], keep: bool) {
    if keep {
        return;
    }
    for doc in items.iter_mut() {
        doc.clear_index();
    }
}
