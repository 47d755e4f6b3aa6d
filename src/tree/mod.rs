//! # Route Tree
//!
//! Turns a directory of handler files into a tree of route groups.
//!
//! ```text
//! api/
//!   get.go                 GET  /
//!   users/                 top-level group, becomes usersRouter
//!     get.go               GET  /users
//!     [userId]/            dynamic segment {userId}
//!       get.go             GET  /users/{userId}
//!       post.go            POST /users/{userId}
//!   auth/
//!     login/
//!       post.go            POST /auth/login
//! ```
//!
//! Directory names wrapped in brackets become path parameters, handler files
//! are named after the HTTP method they serve, and every other file is
//! ignored. [`build_tree`] sorts siblings by name so the same directory
//! always produces the same tree.

mod build;
mod classify;
mod types;

pub use build::build_tree;
pub use classify::{classify_dir, classify_handler, HANDLER_EXTENSION};
pub use types::{Group, HttpMethod, RouteLeaf, RouteTree, Segment, SegmentKind};
