//! Classification of single directory entries.

use std::path::Path;

use tracing::debug;

use super::types::{HttpMethod, Segment};
use crate::error::StructureError;

/// File extension of handler sources.
pub const HANDLER_EXTENSION: &str = "go";

/// Characters a parameter name may not contain.
const FORBIDDEN_PARAM_CHARS: [char; 6] = ['/', '\\', '{', '}', ':', '['];

/// Classify a directory name as a static or dynamic segment.
///
/// `path` is only used to report errors.
pub fn classify_dir(name: &str, path: &Path) -> Result<Segment, StructureError> {
    let opens = name.matches('[').count();
    let closes = name.matches(']').count();

    if opens == 0 && closes == 0 {
        if name.contains(['{', '}']) {
            return Err(StructureError::BraceInStatic {
                path: path.to_path_buf(),
            });
        }
        return Ok(Segment::new_static(name));
    }

    let inner = name
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|_| opens == 1 && closes == 1)
        .ok_or_else(|| StructureError::MalformedBrackets {
            path: path.to_path_buf(),
        })?;

    if inner.is_empty() {
        return Err(StructureError::EmptyParameter {
            path: path.to_path_buf(),
        });
    }
    if inner.contains(FORBIDDEN_PARAM_CHARS) || inner.chars().any(char::is_whitespace) {
        return Err(StructureError::InvalidParameter {
            path: path.to_path_buf(),
            param: inner.to_string(),
        });
    }

    debug!(param = inner, "dynamic segment");
    Ok(Segment::new_dynamic(inner))
}

/// Return the method a file handles, or `None` if it is not a handler.
///
/// `get.go`, `GET.go` and `Get.go` all map to GET. Helpers such as
/// `util.go` or `get.txt` are ignored.
pub fn classify_handler(file_name: &str) -> Option<HttpMethod> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if ext != HANDLER_EXTENSION {
        return None;
    }
    HttpMethod::from_token(stem)
}
