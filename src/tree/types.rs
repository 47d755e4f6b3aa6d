use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// HTTP methods a handler file may be named after.
///
/// Declaration order is the order handlers of one directory are registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Every method, in registration order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// Canonical uppercase token, as passed to `.Methods(...)`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Name of the function a handler package exports for this method.
    pub fn exported_symbol(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Patch => "Patch",
            HttpMethod::Delete => "Delete",
            HttpMethod::Head => "Head",
            HttpMethod::Options => "Options",
            HttpMethod::Trace => "Trace",
        }
    }

    /// Parse a file stem case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Whether a segment is matched literally or captured as a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Plain directory, matched literally
    Static,
    /// `[param]` directory, captured as `{param}`
    Dynamic {
        /// Name between the brackets
        param: String,
    },
}

/// One directory component of a route path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Raw directory name (`users`, `[userId]`)
    pub name: String,
    /// Static or dynamic
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new_static(name: impl Into<String>) -> Self {
        Segment {
            name: name.into(),
            kind: SegmentKind::Static,
        }
    }

    pub fn new_dynamic(param: impl Into<String>) -> Self {
        let param = param.into();
        Segment {
            name: format!("[{param}]"),
            kind: SegmentKind::Dynamic { param },
        }
    }

    /// Parameter name for dynamic segments.
    pub fn param_name(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Static => None,
            SegmentKind::Dynamic { param } => Some(param),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, SegmentKind::Dynamic { .. })
    }

    /// How this segment appears in a URL pattern.
    pub fn pattern(&self) -> String {
        match &self.kind {
            SegmentKind::Static => self.name.clone(),
            SegmentKind::Dynamic { param } => format!("{{{param}}}"),
        }
    }
}

/// A handler file found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeaf {
    pub method: HttpMethod,
    /// Function the handler package must export (`Get`, `Post`, ...)
    pub exported_symbol: String,
    /// Directory of the handler relative to the API root, `/`-separated
    pub source_package_path: String,
    /// Handler file on disk
    pub file: PathBuf,
}

/// One directory of the API tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Segments from the API root down to this directory (empty for the root)
    pub segments: Vec<Segment>,
    /// Immediate child of the API root
    pub is_top_level: bool,
    /// Subdirectories keyed by raw name, in lexicographic order
    pub children: BTreeMap<String, Group>,
    /// Handlers directly in this directory, in method order
    pub leaves: Vec<RouteLeaf>,
    /// Middleware attached to this group's subrouter
    pub middleware: Vec<String>,
}

impl Group {
    /// Raw name of the directory, empty for the root.
    pub fn name(&self) -> &str {
        self.segments.last().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Directory relative to the API root, `/`-separated.
    pub fn relative_path(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Full URL pattern of this directory (`/users/{userId}`).
    pub fn route_pattern(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|s| format!("/{}", s.pattern()))
            .collect()
    }

    /// URL pattern below the top-level group's prefix; empty for the group itself.
    pub fn subrouter_pattern(&self) -> String {
        self.segments
            .iter()
            .skip(1)
            .map(|s| format!("/{}", s.pattern()))
            .collect()
    }

    /// Whether any directory in this subtree holds a handler.
    pub fn has_routes(&self) -> bool {
        !self.leaves.is_empty() || self.children.values().any(Group::has_routes)
    }

    /// Pre-order walk over this group and its descendants.
    pub fn walk(&self) -> Vec<&Group> {
        let mut out = vec![self];
        for child in self.children.values() {
            out.extend(child.walk());
        }
        out
    }

    /// Groups in this subtree that hold at least one handler, in traversal order.
    pub fn routed_groups(&self) -> Vec<&Group> {
        self.walk()
            .into_iter()
            .filter(|g| !g.leaves.is_empty())
            .collect()
    }
}

/// The API directory as a tree of groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTree {
    pub root: Group,
}

impl RouteTree {
    /// Immediate children of the API root, in lexicographic order.
    pub fn top_level_groups(&self) -> impl Iterator<Item = &Group> {
        self.root.children.values()
    }

    pub fn top_level_group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.root.children.get_mut(name)
    }

    /// Every group with at least one handler, in traversal order.
    pub fn routed_groups(&self) -> Vec<&Group> {
        self.root.routed_groups()
    }

    /// Every `(group, leaf)` pair in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&Group, &RouteLeaf)> {
        self.routed_groups()
            .into_iter()
            .flat_map(|g| g.leaves.iter().map(move |leaf| (g, leaf)))
    }

    pub fn route_count(&self) -> usize {
        self.routes().count()
    }
}
