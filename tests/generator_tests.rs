#![allow(clippy::unwrap_used, clippy::expect_used)]

use fsrouter::generator::{generate, generate_routes_file, OutputMode, WriteOutcome};
use fsrouter::{GenerateError, StructureError};
use std::fs;

mod common;
use common::api_tree::ApiTree;
use common::source::{position, route_lines};

fn sample_api() -> ApiTree {
    ApiTree::with_files(&[
        "users/get.go",
        "users/post.go",
        "users/[userId]/get.go",
        "users/[userId]/delete.go",
        "users/[userId]/posts/get.go",
        "auth/login/post.go",
        "admin/settings/PUT.go",
    ])
}

#[test]
fn test_full_generation() {
    let api = sample_api();
    let mut config = api.config();
    config.global_middlewares = vec!["loggingMiddleware".to_string()];
    config
        .group_middlewares
        .insert("users".to_string(), vec!["authMiddleware".to_string()]);

    let (generated, outcome) = generate_routes_file(&config, OutputMode::Write).unwrap();
    assert_eq!(outcome, WriteOutcome::Written);
    assert_eq!(generated.tree.route_count(), 7);

    let src = api.generated();
    assert!(src.starts_with("// Code generated by fsrouter. DO NOT EDIT.\n"));
    assert!(src.contains("package main\n"));
    assert!(src.contains("func RegisterRoutes() *mux.Router {"));

    assert_eq!(
        route_lines(&src),
        vec![
            r#"adminRouter.HandleFunc("/settings", api_admin_settings.Put).Methods("PUT")"#,
            r#"authRouter.HandleFunc("/login", api_auth_login.Post).Methods("POST")"#,
            r#"usersRouter.HandleFunc("", api_users.Get).Methods("GET")"#,
            r#"usersRouter.HandleFunc("", api_users.Post).Methods("POST")"#,
            r#"usersRouter.HandleFunc("/{userId}", api_users__userId.Get).Methods("GET")"#,
            r#"usersRouter.HandleFunc("/{userId}", api_users__userId.Delete).Methods("DELETE")"#,
            r#"usersRouter.HandleFunc("/{userId}/posts", api_users__userId_posts.Get).Methods("GET")"#,
        ]
    );
    assert!(position(&src, "usersRouter.Use(authMiddleware)") < position(&src, "usersRouter.HandleFunc"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let api = sample_api();
    let config = api.config();
    generate_routes_file(&config, OutputMode::Write).unwrap();
    let first = fs::read(api.output_path()).unwrap();

    let (_, outcome) = generate_routes_file(&config, OutputMode::Write).unwrap();
    assert_eq!(outcome, WriteOutcome::Unchanged);
    assert_eq!(fs::read(api.output_path()).unwrap(), first);
}

#[test]
fn test_output_uses_tabs_and_single_trailing_newline() {
    let api = sample_api();
    let src = generate(&api.config()).unwrap().source;
    assert!(src.ends_with("}\n"));
    assert!(!src.ends_with("\n\n"));
    assert!(src.contains("\n\tr := mux.NewRouter()\n"));
    assert!(!src.lines().any(|l| l.starts_with("    ")));
    assert!(!src.lines().any(|l| l.ends_with(' ') || l.ends_with('\t')));
}

#[test]
fn test_new_handler_file_changes_output() {
    let api = sample_api();
    let before = generate(&api.config()).unwrap().source;
    api.add_file("users/[userId]/patch.go");
    let after = generate(&api.config()).unwrap().source;
    assert_ne!(before, after);
    assert!(after.contains(
        r#"usersRouter.HandleFunc("/{userId}", api_users__userId.Patch).Methods("PATCH")"#
    ));
}

#[test]
fn test_root_handlers_only() {
    let api = ApiTree::with_files(&["get.go", "options.go"]);
    let src = generate(&api.config()).unwrap().source;
    assert!(src.contains("\tapi \"example.com/app/api\"\n"));
    assert_eq!(
        route_lines(&src),
        vec![
            r#"r.HandleFunc("/", api.Get).Methods("GET")"#,
            r#"r.HandleFunc("/", api.Options).Methods("OPTIONS")"#,
        ]
    );
    assert!(!src.contains("Subrouter()"));
}

#[test]
fn test_empty_api_root() {
    let api = ApiTree::with_files(&[]);
    let generated = generate(&api.config()).unwrap();
    assert_eq!(generated.tree.route_count(), 0);
    assert!(generated.source.contains("r := mux.NewRouter()"));
    assert!(generated.source.contains("return r"));
    assert!(route_lines(&generated.source).is_empty());
}

#[test]
fn test_dynamic_top_level_group() {
    let api = ApiTree::with_files(&["[tenant]/users/get.go"]);
    let mut config = api.config();
    config
        .group_middlewares
        .insert("[tenant]".to_string(), vec!["tenantMiddleware".to_string()]);
    let generated = generate(&config).unwrap();
    assert!(generated.warnings.is_empty());
    let src = generated.source;
    assert!(src.contains(r#"_tenantRouter := r.PathPrefix("/{tenant}").Subrouter()"#));
    assert!(src.contains("_tenantRouter.Use(tenantMiddleware)"));
    assert!(src.contains(r#"_tenantRouter.HandleFunc("/users", api__tenant_users.Get)"#));
}

#[test]
fn test_punctuated_directory_names() {
    let api = ApiTree::with_files(&["user-profiles/get.go", "v1.2/get.go"]);
    let src = generate(&api.config()).unwrap().source;
    assert!(src.contains(r#"userZ2DprofilesRouter := r.PathPrefix("/user-profiles")"#));
    assert!(src.contains(r#"api_userZ2Dprofiles "example.com/app/api/user-profiles""#));
    assert!(src.contains(r#"v1Z2E2Router := r.PathPrefix("/v1.2")"#));
}

#[test]
fn test_structure_error_leaves_output_untouched() {
    let api = sample_api();
    let config = api.config();
    generate_routes_file(&config, OutputMode::Write).unwrap();
    let before = api.generated();

    api.add_dir("users/[a]");
    api.add_dir("users/[b]");
    let err = generate_routes_file(&config, OutputMode::Write).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Structure(StructureError::AmbiguousDynamic { .. })
    ));
    assert_eq!(api.generated(), before);
}

#[test]
fn test_malformed_bracket_reports_path() {
    let api = ApiTree::with_files(&["users/[id/get.go"]);
    let err = generate(&api.config()).unwrap_err();
    assert!(err.to_string().contains("[id"), "{err}");
}

#[test]
fn test_check_mode_reports_stale_file() {
    let api = sample_api();
    let config = api.config();
    fs::write(api.output_path(), "// stale\n").unwrap();
    let (_, outcome) = generate_routes_file(&config, OutputMode::Check).unwrap();
    assert_eq!(outcome, WriteOutcome::Stale);
    assert_eq!(api.generated(), "// stale\n");
}

#[test]
fn test_output_directory_created() {
    let api = sample_api();
    let mut config = api.config();
    config.output_path = api.dir.path().join("internal").join("routes").join("routes_gen.go");
    let (_, outcome) = generate_routes_file(&config, OutputMode::Write).unwrap();
    assert_eq!(outcome, WriteOutcome::Written);
    assert!(config.output_path.exists());
}

#[test]
fn test_output_inside_api_root_is_not_a_route() {
    let api = sample_api();
    let mut config = api.config();
    config.output_path = api.api_root().join("routes_gen.go");
    generate_routes_file(&config, OutputMode::Write).unwrap();
    let generated = generate(&config).unwrap();
    assert_eq!(generated.tree.route_count(), 7);
}
