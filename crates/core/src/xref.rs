//! Cross-reference recovery from per-file detail documents.
//!
//! Each file's detail document is scraped line by line for its location,
//! include edges, inner-entity references and the program listing block.
//! A file whose document cannot be read is logged and skipped.

use crate::model::{NodeId, SymbolGraph};
use crate::scope;
use doxtree_api::{DetailSource, NodeKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, info, warn};

static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<location file="([^"]*)"\s*/>"#).expect("valid location pattern")
});
static INCLUDED_BY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<includedby refid="(\w+)"[^>]*>(.*)</includedby>"#)
        .expect("valid includedby pattern")
});
static INCLUDES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<includes[^>]*>(.+)</includes>"#).expect("valid includes pattern")
});
static INNER_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<inner\w*\s[^>]*refid="(\w+)""#).expect("valid inner reference pattern")
});

const LISTING_OPEN: &str = "<programlisting>";
const LISTING_CLOSE: &str = "</programlisting>";

/// Everything recovered from one detail document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapedFile {
    pub location: Option<String>,
    pub includes: Vec<String>,
    pub included_by: Vec<(String, String)>,
    pub inner_refs: Vec<String>,
    pub program_listing: Vec<String>,
}

pub fn scrape(text: &str) -> ScrapedFile {
    let mut scraped = ScrapedFile::default();
    let mut in_listing = false;

    for line in text.lines() {
        if let Some(caps) = LOCATION.captures(line) {
            scraped.location = Some(caps[1].to_string());
            continue;
        }
        if in_listing {
            if line.contains(LISTING_CLOSE) {
                in_listing = false;
            } else {
                scraped.program_listing.push(line.to_string());
            }
            continue;
        }
        if let Some(caps) = INCLUDED_BY.captures(line) {
            scraped
                .included_by
                .push((caps[1].to_string(), caps[2].to_string()));
        } else if let Some(caps) = INCLUDES.captures(line) {
            scraped.includes.push(caps[1].to_string());
        } else if let Some(caps) = INNER_REF.captures(line) {
            scraped.inner_refs.push(caps[1].to_string());
        } else if line.contains(LISTING_OPEN) {
            in_listing = true;
        }
    }
    scraped
}

/// Removes `strip` from a recovered location, then any leading `/`.
pub fn strip_location(location: &str, strip: &str) -> String {
    let stripped = if strip.is_empty() {
        location.to_string()
    } else {
        location.replace(strip, "")
    };
    stripped.strip_prefix('/').unwrap_or(&stripped).to_string()
}

#[derive(Debug, Default, Clone)]
pub struct XrefReport {
    pub resolved: usize,
    /// `(file name, reason)` for every skipped file.
    pub failures: Vec<(String, String)>,
    pub memberships: usize,
    pub orphans: usize,
}

pub fn resolve(graph: &mut SymbolGraph, source: &dyn DetailSource, strip: &str) -> XrefReport {
    let mut report = XrefReport::default();
    let mut staged: HashMap<NodeId, Vec<String>> = HashMap::new();

    for file in graph.collections.files.clone() {
        let refid = graph.node(file).refid.clone();
        let text = match source.detail(&refid) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = graph.name(file), refid = %refid, error = %e, "Unable to process detail document");
                report
                    .failures
                    .push((graph.name(file).to_string(), e.to_string()));
                continue;
            }
        };

        let scraped = scrape(&text);
        if let Some(info) = graph.node_mut(file).file_info_mut() {
            if let Some(location) = scraped.location {
                info.location = location;
            }
            info.includes.extend(scraped.includes);
            info.included_by.extend(scraped.included_by);
            info.program_listing.extend(scraped.program_listing);
        }
        staged.insert(file, scraped.inner_refs);
        report.resolved += 1;
    }

    for file in graph.collections.files.clone() {
        if let Some(info) = graph.node_mut(file).file_info_mut() {
            info.location = strip_location(&info.location, strip);
        }
    }

    for file in graph.collections.files.clone() {
        let refs = staged.remove(&file).unwrap_or_default();
        report.memberships += transfer_ownership(graph, file, &refs);
    }

    for file in graph.collections.files.clone() {
        report.orphans += recover_orphans(graph, file);
    }

    info!(
        resolved = report.resolved,
        skipped = report.failures.len(),
        memberships = report.memberships,
        orphans = report.orphans,
        "Cross-references resolved"
    );
    report
}

fn transfer_ownership(graph: &mut SymbolGraph, file: NodeId, refs: &[String]) -> usize {
    let mut added = 0;
    for refid in refs {
        let Some(child) = graph.by_refid(refid) else {
            continue;
        };
        match graph.kind(child) {
            NodeKind::Struct
            | NodeKind::Class
            | NodeKind::Function
            | NodeKind::Typedef
            | NodeKind::Define
            | NodeKind::Enum
            | NodeKind::Union => {
                let name = graph.name(child);
                if graph.members(file).iter().any(|&m| graph.name(m) == name) {
                    continue;
                }
                // Unions owned by a class-like are documented by that owner only.
                if graph.kind(child) == NodeKind::Union
                    && !graph.collections.unions.contains(&child)
                {
                    continue;
                }
                if graph.add_member(file, child) {
                    added += 1;
                }
            }
            NodeKind::Namespace => {
                let name = graph.name(child).to_string();
                let already = graph
                    .node(file)
                    .file_info()
                    .map(|info| info.namespaces_used.iter().any(|&n| graph.name(n) == name))
                    .unwrap_or(true);
                if !already {
                    if let Some(info) = graph.node_mut(file).file_info_mut() {
                        info.namespaces_used.push(child);
                    }
                }
            }
            _ => {}
        }
    }
    added
}

/// Attaches namespace members the indexer never linked to `file`.
///
/// A candidate qualifies when its refid contains the file's refid and its
/// unqualified name occurs somewhere in the recovered listing.
fn recover_orphans(graph: &mut SymbolGraph, file: NodeId) -> usize {
    let found: Vec<NodeId> = {
        let node = graph.node(file);
        let Some(info) = node.file_info() else {
            return 0;
        };
        info.namespaces_used
            .iter()
            .flat_map(|&ns| graph.children(ns).iter().copied())
            .filter(|&child| {
                matches!(
                    graph.kind(child),
                    NodeKind::Enum
                        | NodeKind::Variable
                        | NodeKind::Function
                        | NodeKind::Typedef
                        | NodeKind::Union
                )
            })
            .filter(|&child| {
                let candidate = graph.node(child);
                let short = scope::last_component(&candidate.name);
                candidate.refid.contains(node.refid.as_str())
                    && info.program_listing.iter().any(|line| line.contains(short))
            })
            .collect()
    };

    let mut added = 0;
    for orphan in found {
        if graph.add_member(file, orphan) {
            debug!(file = graph.name(file), orphan = graph.name(orphan), "Recovered orphan");
            added += 1;
        }
    }
    added
}
