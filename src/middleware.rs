//! # Middleware Resolver
//!
//! Builds the middleware attachment plan: the global chain for the root
//! router and one chain per top-level group for its subrouter.
//!
//! Attachment order is the order middleware wraps requests in, so lists keep
//! their configured order. Duplicates inside one list are dropped, keeping
//! the first occurrence. A name may appear both globally and in a group; both
//! attachments are emitted and both run.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use tracing::warn;

use crate::tree::RouteTree;

/// Ordered, deduplicated middleware for the whole router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiddlewarePlan {
    /// Attached to the root router
    pub global: Vec<String>,
    /// Attached to the subrouter of each named top-level group
    pub per_group: BTreeMap<String, Vec<String>>,
}

impl MiddlewarePlan {
    /// Middleware for one top-level group, empty when none is configured.
    pub fn for_group(&self, group: &str) -> &[String] {
        self.per_group.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Copy each group's chain onto its top-level [`crate::tree::Group`].
    pub fn apply(&self, tree: &mut RouteTree) {
        for (group, names) in &self.per_group {
            if let Some(node) = tree.top_level_group_mut(group) {
                node.middleware = names.clone();
            }
        }
    }
}

/// A middleware rule that was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareWarning {
    /// The group named in the mapping has no top-level directory
    UnknownGroup {
        /// Key from the group mapping
        group: String,
        /// Middleware that will not be attached
        middleware: Vec<String>,
    },
}

impl fmt::Display for MiddlewareWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareWarning::UnknownGroup { group, middleware } => write!(
                f,
                "group middleware for `{group}` ignored ({}): no top-level directory named `{group}`",
                middleware.join(", ")
            ),
        }
    }
}

/// The plan together with the rules that could not be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub plan: MiddlewarePlan,
    pub warnings: Vec<MiddlewareWarning>,
}

/// Resolve global and per-group middleware against the route tree.
///
/// A group key without a matching top-level directory is reported as a
/// warning and skipped. A key matching a directory without handlers is kept:
/// the subrouter gets its middleware and no routes.
pub fn resolve(
    global: &[String],
    groups: &BTreeMap<String, Vec<String>>,
    tree: &RouteTree,
) -> Resolution {
    let known: HashSet<&str> = tree.top_level_groups().map(|g| g.name()).collect();
    let mut resolution = Resolution {
        plan: MiddlewarePlan {
            global: dedup_keep_first(global),
            per_group: BTreeMap::new(),
        },
        warnings: Vec::new(),
    };

    for (group, names) in groups {
        let names = dedup_keep_first(names);
        if known.contains(group.as_str()) {
            resolution.plan.per_group.insert(group.clone(), names);
        } else {
            let warning = MiddlewareWarning::UnknownGroup {
                group: group.clone(),
                middleware: names,
            };
            warn!("{warning}");
            resolution.warnings.push(warning);
        }
    }
    resolution
}

/// Remove repeated names, keeping the first occurrence of each.
pub fn dedup_keep_first(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|n| seen.insert(n.as_str()))
        .cloned()
        .collect()
}
