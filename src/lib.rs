//! # fsrouter
//!
//! **fsrouter** turns a directory of Go handler packages into a generated Go
//! source file that registers every handler with a
//! [`gorilla/mux`](https://github.com/gorilla/mux) router. The directory
//! layout is the routing table: no annotations, no registration code.
//!
//! ## Overview
//!
//! ```text
//! api/
//! ├── get.go                  GET    /
//! ├── users/
//! │   ├── get.go              GET    /users
//! │   ├── post.go             POST   /users
//! │   └── [userId]/
//! │       ├── get.go          GET    /users/{userId}
//! │       └── delete.go       DELETE /users/{userId}
//! └── admin/
//!     └── settings/
//!         └── put.go          PUT    /admin/settings
//! ```
//!
//! Each handler file is named after the HTTP method it serves and exports a
//! function of the same name in PascalCase (`get.go` exports `Get`). A
//! directory written `[name]` captures a path parameter. Every top-level
//! directory becomes a subrouter that can carry its own middleware chain.
//!
//! ## Architecture
//!
//! - **[`tree`]** - Classifies directory entries and builds the route tree
//! - **[`ident`]** - Collision-free Go identifiers for import aliases and router variables
//! - **[`middleware`]** - Resolves global and per-group middleware chains
//! - **[`generator`]** - Renders the Go file with askama and writes it out
//! - **[`config`]** - Generator options from flags and TOML files
//! - **[`watch`]** - Regenerates on filesystem changes
//! - **[`cli`]** - The `fsrouter` command
//!
//! ## Quick Start
//!
//! ```bash
//! fsrouter generate --api api --out routes_gen.go \
//!     --import-prefix example.com/app/api \
//!     --group-middlewares '{"users":"authMiddleware"}'
//! ```
//!
//! Or from code:
//!
//! ```rust,ignore
//! use fsrouter::{generate_routes_file, GeneratorConfig, OutputMode};
//!
//! let config = GeneratorConfig {
//!     import_prefix: "example.com/app/api".into(),
//!     ..GeneratorConfig::default()
//! };
//! let (generated, _) = generate_routes_file(&config, OutputMode::Write)?;
//! println!("{} routes", generated.tree.route_count());
//! ```
//!
//! ## Error Handling
//!
//! Every failure is reported before the output file is touched: a bad option
//! is a [`ConfigError`], a directory that breaks a naming rule is a
//! [`StructureError`], and both are wrapped in [`GenerateError`] together
//! with filesystem and rendering failures.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod ident;
pub mod middleware;
pub mod tree;
pub mod watch;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerateError, StructureError};
pub use generator::{generate, generate_routes_file, Generated, OutputMode, WriteOutcome};
pub use tree::{build_tree, HttpMethod, RouteTree};
