//! # CLI Module
//!
//! Command-line front end of the routes generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Scan the API directory and write the routes file:
//!
//! ```bash
//! fsrouter generate --api api --out routes_gen.go \
//!     --import-prefix example.com/app/api
//! ```
//!
//! Options:
//! - `--config <FILE>` - TOML file with generator options
//! - `--api <DIR>` - API directory (default: `api`)
//! - `--out <FILE>` - Generated file (default: `routes_gen.go`)
//! - `--pkg <NAME>` - Package of the generated file (default: `main`)
//! - `--import-prefix <PATH>` - Import path of the API directory (required)
//! - `--middleware <PATH>` - Middleware package, referenced as `mw`
//! - `--middlewares <A,B>` - Global middleware (default: `loggingMiddleware`)
//! - `--group-middlewares <JSON>` - Per-group middleware
//! - `--not-found <PATH.Symbol>` - Custom 404 handler
//! - `--dry-run` - Print instead of writing
//! - `--check` - Fail if the file on disk is stale
//! - `--fmt` - Run gofmt on the result
//! - `--watch` - Regenerate on every change
//!
//! ### `routes`
//!
//! Print the route table without generating code:
//!
//! ```bash
//! fsrouter routes --api api
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Options from a file, overridden on the command line
//! fsrouter generate --config fsrouter.toml --out internal/routes_gen.go
//!
//! # CI check
//! fsrouter generate --config fsrouter.toml --check
//!
//! # Per-group middleware, original flag spellings
//! fsrouter generate --importPREFIX example.com/app/api \
//!     --groupMiddlewares '{"users":"authMiddleware","admin":["adminAuth"]}'
//! ```

mod commands;


pub use commands::{init_logging, run, run_cli, Cli, Commands, GenerateArgs};
