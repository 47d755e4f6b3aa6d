//! # Generator Module
//!
//! Turns an API directory into a Go source file that registers every handler
//! with a `gorilla/mux` router.
//!
//! ## Pipeline
//!
//! ```text
//! GeneratorConfig → validate → tree::build_tree → middleware::resolve
//!                 → emit (askama) → write_output
//! ```
//!
//! 1. **Validate** - every option is checked before the filesystem is touched
//! 2. **Build** - the API directory becomes a [`RouteTree`]
//! 3. **Resolve** - global and per-group middleware become a [`MiddlewarePlan`]
//! 4. **Emit** - `templates/routes.go.txt` is rendered from the tree and plan
//! 5. **Write** - the finished text is written in one go, printed, or compared
//!
//! A failure in steps 1 to 4 returns before step 5, so an existing generated
//! file is never replaced by a partial one.
//!
//! ## Generated file
//!
//! ```go
//! func RegisterRoutes() *mux.Router {
//!     r := mux.NewRouter()
//!
//!     // Global middleware
//!     r.Use(loggingMiddleware)
//!
//!     // /users
//!     usersRouter := r.PathPrefix("/users").Subrouter()
//!     usersRouter.Use(authMiddleware)
//!     usersRouter.HandleFunc("", api_users.Get).Methods("GET")
//!     usersRouter.HandleFunc("/{userId}", api_users__userId.Get).Methods("GET")
//!
//!     // 404 handler
//!     r.NotFoundHandler = http.HandlerFunc(defaultNotFoundHandler)
//!
//!     return r
//! }
//! ```

mod emit;
mod format;
mod output;
mod templates;

pub use emit::{emit, DEFAULT_NOT_FOUND, MIDDLEWARE_ALIAS, NOT_FOUND_ALIAS};
pub use format::format_output;
pub use output::{write_output, OutputMode, WriteOutcome};
pub use templates::{go_quote, GroupBlock, ImportLine, RouteLine, RoutesTemplateData};

use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::middleware::{resolve, MiddlewarePlan, MiddlewareWarning, Resolution};
use crate::tree::{build_tree, RouteTree};

/// Everything produced by one generation run, before it is written.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Rendered Go source
    pub source: String,
    /// The tree the source was rendered from, middleware applied
    pub tree: RouteTree,
    /// The middleware plan used
    pub plan: MiddlewarePlan,
    /// Middleware rules that were ignored
    pub warnings: Vec<MiddlewareWarning>,
}

/// Validate `config`, scan the API directory and render the routes file.
///
/// Nothing is written; see [`generate_routes_file`].
pub fn generate(config: &GeneratorConfig) -> Result<Generated> {
    config.validate()?;
    let mut tree = build_tree(&config.api_root)?;
    let Resolution { plan, warnings } =
        resolve(&config.global_middlewares, &config.group_middlewares, &tree);
    plan.apply(&mut tree);
    let source = emit(&tree, &plan, config)?;

    info!(
        api_root = %config.api_root.display(),
        routes = tree.route_count(),
        warnings = warnings.len(),
        "generated routes"
    );
    Ok(Generated {
        source,
        tree,
        plan,
        warnings,
    })
}

/// [`generate`], then deliver the result to `config.output_path` per `mode`.
pub fn generate_routes_file(
    config: &GeneratorConfig,
    mode: OutputMode,
) -> Result<(Generated, WriteOutcome)> {
    let generated = generate(config)?;
    let outcome = write_output(&config.output_path, &generated.source, mode)?;
    Ok((generated, outcome))
}
