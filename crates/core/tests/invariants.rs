mod common;

use common::{FileDetail, config_in, details, rec};
use doxtree_api::{CompoundRecord, NodeKind};
use doxtree_core::discover::discover;
use doxtree_core::emit::{CLASS_VIEW_ID, DIRECTORY_VIEW_ID, Emitter, RstRenderer};
use doxtree_core::reparent::reparent_all;
use doxtree_core::sort::sort_ids;
use doxtree_core::{DoxtreeError, Generator, NodeId, SymbolGraph};
use std::collections::{HashMap, HashSet};
use tempfile::tempdir;

fn mixed_records() -> Vec<CompoundRecord> {
    vec![
        rec(NodeKind::Namespace, "outer", "namespaceouter").with_members(vec![
            rec(NodeKind::Function, "run", "namespaceouter_1a1"),
            rec(NodeKind::Typedef, "Size", "namespaceouter_1a2"),
        ]),
        rec(NodeKind::Namespace, "outer::inner", "namespaceouter_1_1inner").with_members(vec![
            rec(NodeKind::Variable, "limit", "namespaceouter_1_1inner_1a3"),
        ]),
        rec(NodeKind::Class, "outer::Engine", "classouter_1_1Engine").with_members(vec![
            rec(NodeKind::Function, "start", "classouter_1_1Engine_1a4"),
            rec(NodeKind::Enum, "State", "classouter_1_1Engine_1a5"),
        ]),
        rec(NodeKind::Struct, "outer::Engine::Part", "structouter_1_1Engine_1_1Part"),
        rec(NodeKind::Union, "outer::Engine::Raw", "unionouter_1_1Engine_1_1Raw"),
        rec(NodeKind::Union, "outer::inner::Cell", "unionouter_1_1inner_1_1Cell"),
        rec(NodeKind::Class, "Standalone", "classStandalone"),
        rec(NodeKind::Dir, "src", "dir_src"),
        rec(NodeKind::Dir, "src/detail", "dir_src_detail"),
        rec(NodeKind::File, "engine.h", "engine_8h").with_members(Vec::new()),
    ]
}

#[test]
fn test_reparenting_twice_changes_nothing() {
    let mut graph = discover(&mixed_records()).unwrap();
    reparent_all(&mut graph).unwrap();
    let first = graph.outline();

    let second = reparent_all(&mut graph).unwrap();
    assert!(second.is_noop(), "second pass changed structure: {second:?}");
    assert_eq!(graph.outline(), first);
}

fn permutations(items: &[NodeId]) -> Vec<Vec<NodeId>> {
    fn heap(k: usize, items: &mut Vec<NodeId>, out: &mut Vec<Vec<NodeId>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        heap(k - 1, items, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
            heap(k - 1, items, out);
        }
    }
    let mut items = items.to_vec();
    let mut out = Vec::new();
    heap(items.len(), &mut items, &mut out);
    out
}

#[test]
fn test_sort_is_independent_of_input_order() {
    let mut graph = SymbolGraph::new();
    let ids: Vec<NodeId> = [
        (NodeKind::Class, "beta"),
        (NodeKind::Function, "apply"),
        (NodeKind::Struct, "zeta"),
        (NodeKind::Namespace, "ns"),
        (NodeKind::Class, "Alpha"),
        (NodeKind::Enum, "Color"),
    ]
    .iter()
    .map(|&(kind, name)| graph.insert(kind, name, &format!("{kind}{name}")).0)
    .collect();

    let all = permutations(&ids);
    assert_eq!(all.len(), 720);

    let names = |order: &[NodeId]| -> Vec<String> {
        order.iter().map(|&id| graph.name(id).to_string()).collect()
    };
    for mut order in all {
        sort_ids(&graph, &mut order);
        assert_eq!(
            names(&order),
            vec!["zeta", "Alpha", "beta", "Color", "apply", "ns"]
        );
    }
}

#[test]
fn test_two_files_claiming_one_symbol_is_fatal() {
    let dir = tempdir().unwrap();
    let generator = Generator::new(config_in(&dir.path().join("api"), dir.path()));
    let records = vec![
        rec(NodeKind::Class, "Shared", "classShared"),
        rec(NodeKind::File, "a.h", "a_8h").with_members(Vec::new()),
        rec(NodeKind::File, "b.h", "b_8h").with_members(Vec::new()),
    ];
    let root = dir.path().display();
    let a = FileDetail::new("a_8h", "a.h", &format!("{root}/a.h"))
        .inner("class", "classShared")
        .build();
    let b = FileDetail::new("b_8h", "b.h", &format!("{root}/b.h"))
        .inner("class", "classShared")
        .build();

    let err = generator
        .run(&records, &details(&[("a_8h", a), ("b_8h", b)]))
        .unwrap_err();
    assert!(err.is_fatal());
    match err {
        DoxtreeError::OwnershipConflict { node, first, second } => {
            assert_eq!(node, "Shared");
            assert_eq!(first, "a.h");
            assert_eq!(second, "b.h");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_member_listed_by_two_file_records_is_not_a_conflict() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("api");
    let generator = Generator::new(config_in(&out, dir.path()));
    let f = rec(NodeKind::Function, "f", "f_1");
    let records = vec![
        rec(NodeKind::File, "a.h", "a_8h").with_members(vec![f.clone()]),
        rec(NodeKind::File, "a.cpp", "a_8cpp").with_members(vec![f]),
    ];

    let report = generator
        .run(&records, &HashMap::<String, String>::new())
        .unwrap();
    assert_eq!(report.nodes, 3);
    assert!(out.join("function_f.rst").exists());
}

#[test]
fn test_every_structural_node_is_reachable_from_aggregates() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir.path().join("api"), dir.path());
    let generator = Generator::new(config.clone());
    let (graph, _) = generator
        .build_graph(&mixed_records(), &HashMap::<String, String>::new())
        .unwrap();

    let emitter = Emitter::new(&graph, &config, &RstRenderer);
    let class_view = emitter.class_view();
    let directory_view = emitter.directory_view();
    assert_eq!(class_view.id, CLASS_VIEW_ID);
    assert_eq!(directory_view.id, DIRECTORY_VIEW_ID);

    let mut anchors: HashSet<String> = HashSet::new();
    anchors.extend(class_view.references().into_iter().map(str::to_string));
    anchors.extend(directory_view.references().into_iter().map(str::to_string));
    let listed: HashSet<String> = emitter.listed_ids().into_iter().collect();

    for (id, node) in graph.nodes() {
        let covered_kind = node.kind.is_class_like()
            || matches!(
                node.kind,
                NodeKind::Enum | NodeKind::Union | NodeKind::Namespace | NodeKind::File | NodeKind::Dir
            );
        if !covered_kind {
            continue;
        }
        let names = emitter.names().get(id);
        assert!(
            anchors.contains(&names.anchor) || listed.contains(&names.doc_id),
            "{} is not reachable from any aggregate document",
            node.name
        );
    }
}
