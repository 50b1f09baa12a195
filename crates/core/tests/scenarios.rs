mod common;

use common::{FileDetail, config_in, details, rec};
use doxtree_api::NodeKind;
use doxtree_core::emit::{Emitter, RstRenderer};
use doxtree_core::Generator;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_nested_class_chain_leaves_no_top_level_class() {
    let dir = tempdir().unwrap();
    let generator = Generator::new(config_in(&dir.path().join("api"), dir.path()));
    let records = vec![
        rec(NodeKind::Class, "ns::Outer", "classns_1_1Outer"),
        rec(NodeKind::Class, "ns::Outer::Inner", "classns_1_1Outer_1_1Inner"),
        rec(NodeKind::Namespace, "ns", "namespacens"),
    ];

    let (graph, _) = generator
        .build_graph(&records, &HashMap::<String, String>::new())
        .unwrap();
    let ns = graph.by_refid("namespacens").unwrap();
    let outer = graph.by_refid("classns_1_1Outer").unwrap();
    let inner = graph.by_refid("classns_1_1Outer_1_1Inner").unwrap();

    assert_eq!(graph.children(ns), &[outer]);
    assert_eq!(graph.children(outer), &[inner]);
    // Namespace members keep their collection slot; nested types drop out.
    assert_eq!(graph.collections.class_like, vec![outer]);
    assert!(
        graph
            .collections
            .class_like
            .iter()
            .all(|&c| graph.parent(c).is_some())
    );
}

#[test]
fn test_orphan_variable_recovered_from_listing() {
    let dir = tempdir().unwrap();
    let generator = Generator::new(config_in(&dir.path().join("api"), dir.path()));
    let records = vec![
        rec(NodeKind::File, "util.h", "util_8h").with_members(Vec::new()),
        rec(NodeKind::Namespace, "util", "namespaceutil").with_members(vec![rec(
            NodeKind::Variable,
            "helper",
            "util_8h_1a4b6c",
        )]),
    ];
    let location = format!("{}/include/util.h", dir.path().display());
    let detail = FileDetail::new("util_8h", "util.h", &location)
        .inner("namespace", "namespaceutil")
        .line("<highlight class=\"normal\">int<sp/>helper<sp/>=<sp/>0;</highlight>")
        .build();

    let (graph, report) = generator
        .build_graph(&records, &details(&[("util_8h", detail)]))
        .unwrap();
    let file = graph.by_refid("util_8h").unwrap();
    let helper = graph.by_refid("util_8h_1a4b6c").unwrap();
    let ns = graph.by_refid("namespaceutil").unwrap();

    assert_eq!(report.orphans, 1);
    assert!(graph.members(file).contains(&helper));
    assert_eq!(graph.parent(helper), Some(ns));
    assert_eq!(graph.name(helper), "util::helper");
    assert_eq!(graph.node(file).location(), "include/util.h");
}

#[test]
fn test_directory_nesting() {
    let dir = tempdir().unwrap();
    let generator = Generator::new(config_in(&dir.path().join("api"), dir.path()));
    let records = vec![
        rec(NodeKind::Dir, "a/b", "dir_ab"),
        rec(NodeKind::Dir, "a", "dir_a"),
    ];

    let (graph, _) = generator
        .build_graph(&records, &HashMap::<String, String>::new())
        .unwrap();
    let a = graph.by_refid("dir_a").unwrap();
    let ab = graph.by_refid("dir_ab").unwrap();

    assert_eq!(graph.collections.dirs, vec![a]);
    assert_eq!(graph.children(a), &[ab]);
}

#[test]
fn test_class_union_left_out_of_union_listing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("api");
    let config = config_in(&out, dir.path());
    let records = vec![
        rec(NodeKind::Namespace, "ns", "namespacens"),
        rec(NodeKind::Class, "ns::Widget", "classns_1_1Widget"),
        rec(NodeKind::Union, "ns::Widget::Color", "unionns_1_1Widget_1_1Color"),
    ];
    let generator = Generator::new(config.clone());
    let empty = HashMap::<String, String>::new();

    let (graph, _) = generator.build_graph(&records, &empty).unwrap();
    let widget = graph.by_refid("classns_1_1Widget").unwrap();
    let color = graph.by_refid("unionns_1_1Widget_1_1Color").unwrap();
    assert_eq!(graph.parent(color), Some(widget));
    assert!(graph.collections.unions.is_empty());

    let emitter = Emitter::new(&graph, &config, &RstRenderer);
    let listed = emitter.listed_ids();
    assert!(!listed.iter().any(|id| id.starts_with("union_")));
    assert!(listed.contains(&"class_ns__Widget".to_string()));

    let report = generator.run(&records, &empty).unwrap();
    assert!(report.failures.is_empty());
    let full = fs::read_to_string(out.join("unabridged_api.rst")).unwrap();
    assert!(!full.contains("\nUnions\n"));
    // The union still gets its own page, linked from its owner.
    assert!(out.join("union_ns__Widget__Color.rst").exists());
    let widget_doc = fs::read_to_string(out.join("class_ns__Widget.rst")).unwrap();
    assert!(widget_doc.contains("**Nested Types**:"));
    assert!(widget_doc.contains("- :ref:`union_ns__Widget__Color`"));
}
