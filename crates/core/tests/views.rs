mod common;

use common::{FileDetail, config_in, details, rec};
use doxtree_api::NodeKind;
use doxtree_core::emit::{Block, Document, Emitter, Renderer, RstRenderer};
use doxtree_core::{Config, Generator, SymbolGraph};
use std::collections::HashMap;
use std::path::Path;
use tempfile::tempdir;

fn class_graph(config: &Config) -> SymbolGraph {
    let records = vec![
        rec(NodeKind::Namespace, "ns", "namespacens"),
        rec(NodeKind::Class, "ns::B", "classns_1_1B"),
        rec(NodeKind::Class, "ns::A", "classns_1_1A"),
        rec(NodeKind::Class, "Top", "classTop").with_members(vec![rec(
            NodeKind::Enum,
            "Top::Mode",
            "classTop_1a1",
        )]),
    ];
    Generator::new(config.clone())
        .build_graph(&records, &HashMap::<String, String>::new())
        .unwrap()
        .0
}

fn raw_lines(doc: &Document) -> Vec<String> {
    doc.blocks
        .iter()
        .find_map(|block| match block {
            Block::Raw { lines, .. } => Some(lines.clone()),
            _ => None,
        })
        .expect("tree view renders raw html")
}

#[test]
fn test_class_view_backfills_unplaced_nodes_once() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir.path().join("api"), dir.path());
    let graph = class_graph(&config);
    let emitter = Emitter::new(&graph, &config, &RstRenderer);

    let view = emitter.class_view();
    assert_eq!(
        view.references(),
        vec![
            "namespace_ns",
            "class_ns__A",
            "class_ns__B",
            "class_Top",
            "enum_Top__Mode",
        ]
    );

    let text = RstRenderer.render(&view);
    assert!(text.starts_with(&format!("Class Hierarchy\n{}\n\n", "-".repeat(88))));
    assert!(text.contains("- :ref:`namespace_ns`\n    - :ref:`class_ns__A`\n"));
    assert!(text.contains("- :ref:`class_Top`\n    - :ref:`enum_Top__Mode`\n"));
}

#[test]
fn test_tree_view_flags_last_children() {
    let dir = tempdir().unwrap();
    let mut config = config_in(&dir.path().join("api"), dir.path());
    config.tree_view = true;
    let graph = class_graph(&config);
    let emitter = Emitter::new(&graph, &config, &RstRenderer);

    let lines = raw_lines(&emitter.class_view());
    let expected = [
        "<ul class=\"treeView\">",
        "  <li>",
        "    <ul class=\"collapsibleList\">",
        "     <li>",
        "       Namespace <a href=\"namespace_ns.html#namespace-ns\">ns</a>",
        "       <ul>",
        "         <li>Class <a href=\"class_ns__A.html#class-ns-A\">A</a></li>",
        "         <li class=\"lastChild\">Class <a href=\"class_ns__B.html#class-ns-B\">B</a></li>",
        "       </ul>",
        "     </li>",
        "     <li class=\"lastChild\">",
        "       Class <a href=\"class_Top.html#class-Top\">Top</a>",
        "       <ul>",
        "         <li class=\"lastChild\">Enum <a href=\"enum_Top__Mode.html#enum-Top-Mode\">Top::Mode</a></li>",
        "       </ul>",
        "     </li>",
        "    </ul><!-- collapsibleList -->",
        "  </li><!-- only tree view element -->",
        "</ul><!-- treeView -->",
    ];
    assert_eq!(lines, expected);
}

#[test]
fn test_last_namespace_flagged_without_backfill() {
    let dir = tempdir().unwrap();
    let mut config = config_in(&dir.path().join("api"), dir.path());
    config.tree_view = true;
    let records = vec![
        rec(NodeKind::Namespace, "alpha", "namespacealpha"),
        rec(NodeKind::Namespace, "beta", "namespacebeta"),
        rec(NodeKind::Namespace, "empty", "namespaceempty"),
        rec(NodeKind::Struct, "alpha::P", "structalpha_1_1P"),
        rec(NodeKind::Struct, "beta::Q", "structbeta_1_1Q"),
    ];
    let (graph, _) = Generator::new(config.clone())
        .build_graph(&records, &HashMap::<String, String>::new())
        .unwrap();
    let emitter = Emitter::new(&graph, &config, &RstRenderer);

    let lines = raw_lines(&emitter.class_view());
    let flagged: Vec<&String> = lines.iter().filter(|l| l.contains("lastChild\"")).collect();
    assert_eq!(flagged.len(), 3);
    assert!(lines.contains(&"     <li class=\"lastChild\">".to_string()));
    // A namespace without class-like content never shows up.
    assert!(!lines.iter().any(|l| l.contains("empty")));
}

fn write_file_detail(details: &mut Vec<(&'static str, String)>, refid: &'static str, root: &Path, location: &str) {
    let name = location.rsplit('/').next().unwrap_or(location);
    let full = format!("{}/{location}", root.display());
    details.push((refid, FileDetail::new(refid, name, &full).build()));
}

#[test]
fn test_directory_view_nests_files_then_directories() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir.path().join("api"), dir.path());
    let records = vec![
        rec(NodeKind::Dir, "include", "dir_1"),
        rec(NodeKind::Dir, "include/core", "dir_2"),
        rec(NodeKind::File, "a.h", "a_8h"),
        rec(NodeKind::File, "b.h", "b_8h"),
        rec(NodeKind::File, "loose.h", "loose_8h"),
    ];
    let mut pairs = Vec::new();
    write_file_detail(&mut pairs, "a_8h", dir.path(), "include/a.h");
    write_file_detail(&mut pairs, "b_8h", dir.path(), "include/core/b.h");
    write_file_detail(&mut pairs, "loose_8h", dir.path(), "loose.h");

    let (graph, _) = Generator::new(config.clone())
        .build_graph(&records, &details(&pairs))
        .unwrap();
    let emitter = Emitter::new(&graph, &config, &RstRenderer);

    let view = emitter.directory_view();
    assert_eq!(
        view.references(),
        vec![
            "directory_include",
            "file_include_a.h",
            "directory_include_core",
            "file_include_core_b.h",
            "file_loose.h",
        ]
    );
    let levels: Vec<usize> = view
        .blocks
        .iter()
        .find_map(|block| match block {
            Block::List(items) => Some(items.iter().map(|i| i.level).collect()),
            _ => None,
        })
        .unwrap();
    assert_eq!(levels, vec![0, 1, 1, 2, 0]);
}
