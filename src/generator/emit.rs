use std::collections::BTreeSet;

use askama::Template;

use super::templates::{comment_text, go_quote, GroupBlock, ImportLine, RouteLine, RoutesTemplateData};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::ident::{import_alias, router_var};
use crate::middleware::MiddlewarePlan;
use crate::tree::{Group, RouteLeaf, RouteTree};

/// Alias of the middleware package import.
pub const MIDDLEWARE_ALIAS: &str = "mw";
/// Alias of the custom not-found handler package import.
pub const NOT_FOUND_ALIAS: &str = "notfound";
/// Name of the built-in JSON not-found handler.
pub const DEFAULT_NOT_FOUND: &str = "defaultNotFoundHandler";

/// Render the Go source registering every route in `tree`.
///
/// The output is a pure function of its inputs: imports are sorted by path,
/// groups come in lexicographic order and routes in tree traversal order, so
/// an unchanged tree always renders to the same bytes.
pub fn emit(tree: &RouteTree, plan: &MiddlewarePlan, config: &GeneratorConfig) -> Result<String> {
    let not_found_ref = config.not_found()?;

    let mut imports: BTreeSet<ImportLine> = tree
        .routed_groups()
        .into_iter()
        .map(|g| ImportLine {
            path: go_quote(&config.handler_import_path(&g.relative_path())),
            alias: import_alias(&g.segments),
        })
        .collect();
    if let Some(pkg) = &config.middleware_package {
        imports.insert(ImportLine {
            path: go_quote(pkg.trim()),
            alias: MIDDLEWARE_ALIAS.to_string(),
        });
    }
    if let Some(nf) = &not_found_ref {
        imports.insert(ImportLine {
            path: go_quote(&nf.import_path),
            alias: NOT_FOUND_ALIAS.to_string(),
        });
    }

    let default_not_found = not_found_ref.is_none();
    let std_imports = if default_not_found {
        vec![go_quote("encoding/json"), go_quote("net/http")]
    } else {
        vec![go_quote("net/http")]
    };

    let groups = tree
        .top_level_groups()
        .filter_map(|g| group_block(g, plan, config))
        .collect();

    let data = RoutesTemplateData {
        package_name: config.package_name.clone(),
        std_imports,
        imports: imports.into_iter().collect(),
        global_middlewares: plan
            .global
            .iter()
            .map(|m| config.middleware_ref(m))
            .collect(),
        root_routes: tree
            .root
            .leaves
            .iter()
            .map(|leaf| route_line(&tree.root, leaf, "/".to_string()))
            .collect(),
        groups,
        not_found: match &not_found_ref {
            Some(nf) => format!("{NOT_FOUND_ALIAS}.{}", nf.symbol),
            None => DEFAULT_NOT_FOUND.to_string(),
        },
        default_not_found,
    };

    let mut source = data.render()?;
    let trimmed = source.trim_end().len();
    source.truncate(trimmed);
    source.push('\n');
    Ok(source)
}

fn group_block(group: &Group, plan: &MiddlewarePlan, config: &GeneratorConfig) -> Option<GroupBlock> {
    let segment = group.segments.first()?;
    let middlewares: Vec<String> = plan
        .for_group(group.name())
        .iter()
        .map(|m| config.middleware_ref(m))
        .collect();
    let routes: Vec<RouteLine> = group
        .routed_groups()
        .into_iter()
        .flat_map(|g| {
            g.leaves
                .iter()
                .map(move |leaf| route_line(g, leaf, g.subrouter_pattern()))
        })
        .collect();
    let unused = middlewares.is_empty() && routes.is_empty();

    Some(GroupBlock {
        comment: comment_text(&group.route_pattern()),
        var: router_var(segment),
        prefix: go_quote(&group.route_pattern()),
        middlewares,
        routes,
        unused,
    })
}

fn route_line(group: &Group, leaf: &RouteLeaf, pattern: String) -> RouteLine {
    RouteLine {
        pattern: go_quote(&pattern),
        handler: format!("{}.{}", import_alias(&group.segments), leaf.exported_symbol),
        method: go_quote(leaf.method.as_str()),
    }
}
