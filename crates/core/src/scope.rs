//! Qualified-name helpers.
//!
//! Scope splitting ignores `::` that appears inside template argument lists,
//! so `ns::Map<std::string, int>` has two components, not three.

pub const SEPARATOR: &str = "::";

fn separator_offsets(name: &str) -> Vec<usize> {
    let bytes = name.as_bytes();
    let mut depth = 0usize;
    let mut offsets = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                offsets.push(i);
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    offsets
}

pub fn split(name: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for offset in separator_offsets(name) {
        parts.push(&name[start..offset]);
        start = offset + SEPARATOR.len();
    }
    parts.push(&name[start..]);
    parts
}

pub fn depth(name: &str) -> usize {
    separator_offsets(name).len() + 1
}

pub fn last_component(name: &str) -> &str {
    match separator_offsets(name).last() {
        Some(&offset) => &name[offset + SEPARATOR.len()..],
        None => name,
    }
}

/// Everything before the last top-level separator.
pub fn parent_scope(name: &str) -> Option<&str> {
    separator_offsets(name).last().map(|&offset| &name[..offset])
}

/// Parent path of a `/`-delimited file or directory name.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rfind('/').map(|idx| &path[..idx])
}
