use askama::Template;

/// One line of the import block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportLine {
    /// Quoted import path; first so lines sort by path
    pub path: String,
    /// Package alias
    pub alias: String,
}

/// One `HandleFunc(...).Methods(...)` registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLine {
    /// Quoted pattern, relative to the router it is registered on
    pub pattern: String,
    /// `alias.Symbol`
    pub handler: String,
    /// Quoted HTTP method
    pub method: String,
}

/// Subrouter block of one top-level group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBlock {
    /// Comment line naming the group
    pub comment: String,
    /// Subrouter variable
    pub var: String,
    /// Quoted path prefix
    pub prefix: String,
    /// Middleware references, in attachment order
    pub middlewares: Vec<String>,
    /// Registrations in traversal order
    pub routes: Vec<RouteLine>,
    /// Neither middleware nor routes; the variable is blank-assigned
    pub unused: bool,
}

/// Template data for the generated Go routes file.
#[derive(Template)]
#[template(path = "routes.go.txt", escape = "none")]
pub struct RoutesTemplateData {
    /// `package` clause
    pub package_name: String,
    /// Quoted standard library imports
    pub std_imports: Vec<String>,
    /// Handler, middleware and not-found imports, sorted by path
    pub imports: Vec<ImportLine>,
    /// Root router middleware references
    pub global_middlewares: Vec<String>,
    /// Handlers in the API root itself
    pub root_routes: Vec<RouteLine>,
    /// Top-level groups in lexicographic order
    pub groups: Vec<GroupBlock>,
    /// Expression passed to `http.HandlerFunc` for unmatched requests
    pub not_found: String,
    /// Whether `defaultNotFoundHandler` is emitted
    pub default_not_found: bool,
}

/// Quote `s` as a Go interpreted string literal.
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Make `s` safe to place after `//` on a single line.
pub fn comment_text(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}
