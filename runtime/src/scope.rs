//! Scope implements the Scoper: partitioning a candidate document set into in-scope and
//! out-of-scope for a given function config.

use api::Document;
use tracing::debug;

use crate::util::{is_in_scope, scope_dir};

/// Scoped is the `(in_scope, out_of_scope)` partition the Scoper produces, each bucket
/// preserving the candidates' original relative order. `mask` parallels the original candidate
/// sequence, recording `true` at each position that landed in `in_scope`, so a caller can later
/// splice transformed items back into their original positions relative to `out_of_scope`.
pub struct Scoped {
    /// In_scope holds every candidate the function is permitted to see.
    pub in_scope: Vec<Document>,
    /// Out_of_scope holds every candidate that bypasses the function entirely.
    pub out_of_scope: Vec<Document>,
    /// Mask records, per original candidate position, whether it was placed in scope.
    pub mask: Vec<bool>,
}

/// Scope partitions `candidates` against `function_config`'s `path` annotation. When
/// `global_scope` is set, every candidate is placed in scope regardless of path.
pub fn scope(function_config: &Document, candidates: Vec<Document>, global_scope: bool) -> Scoped {
    if global_scope {
        debug!("global scope requested, all candidates in scope");
        let mask = vec![true; candidates.len()];
        return Scoped {
            in_scope: candidates,
            out_of_scope: Vec::new(),
            mask,
        };
    }

    let dir = scope_dir(function_config.path().as_deref());
    let Some(dir) = dir else {
        debug!("function config has no path annotation, scope is global");
        let mask = vec![true; candidates.len()];
        return Scoped {
            in_scope: candidates,
            out_of_scope: Vec::new(),
            mask,
        };
    };
    debug!(dir, "computed scope directory");

    let mut in_scope = Vec::new();
    let mut out_of_scope = Vec::new();
    let mut mask = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match candidate.path() {
            Some(path) if is_in_scope(&dir, &path) => {
                mask.push(true);
                in_scope.push(candidate);
            }
            _ => {
                mask.push(false);
                out_of_scope.push(candidate);
            }
        }
    }
    Scoped {
        in_scope,
        out_of_scope,
        mask,
    }
}
