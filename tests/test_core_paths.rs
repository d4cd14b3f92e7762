use graphwire::core::paths::{dijkstra, floyd_warshall};
use graphwire::core::types::GraphStore;

fn build_test_graph() -> GraphStore {
    let mut graph = GraphStore::new();
    for name in ["n0", "n1", "n2", "n3"] {
        graph.insert_node(name);
    }
    graph.upsert_edge("n0", "n1", 1);
    graph.upsert_edge("n0", "n2", 4);
    graph.upsert_edge("n1", "n2", 2);
    graph.upsert_edge("n1", "n3", 6);
    graph.upsert_edge("n2", "n3", 3);
    graph
}

#[test]
fn test_dijkstra_directed() {
    let graph = build_test_graph();
    let n0 = graph.node_id("n0").unwrap();
    let n2 = graph.node_id("n2").unwrap();
    let n3 = graph.node_id("n3").unwrap();
    let dist = dijkstra(&graph, n0);
    assert_eq!(dist.get(&n2), Some(&3));
    assert_eq!(dist.get(&n3), Some(&6));
}

#[test]
fn test_dijkstra_prefers_later_cheaper_route() {
    // The direct edge is found first and then superseded through the
    // intermediate node, exercising the stale-entry skip.
    let mut graph = GraphStore::new();
    for name in ["s", "m", "t"] {
        graph.insert_node(name);
    }
    graph.upsert_edge("s", "t", 10);
    graph.upsert_edge("s", "m", 1);
    graph.upsert_edge("m", "t", 1);
    let s = graph.node_id("s").unwrap();
    let t = graph.node_id("t").unwrap();
    assert_eq!(dijkstra(&graph, s).get(&t), Some(&2));
}

#[test]
fn test_dijkstra_source_is_zero() {
    let graph = build_test_graph();
    let n0 = graph.node_id("n0").unwrap();
    assert_eq!(dijkstra(&graph, n0).get(&n0), Some(&0));
}

#[test]
fn test_floyd_warshall_directed() {
    let graph = build_test_graph();
    let matrix = floyd_warshall(&graph);
    assert_eq!(matrix.distance("n0", "n3"), Some(6));
    assert_eq!(matrix.distance("n1", "n3"), Some(5));
    assert_eq!(matrix.distance("n3", "n0"), None);
}

#[test]
fn test_floyd_warshall_diagonal_is_zero() {
    let graph = build_test_graph();
    let matrix = floyd_warshall(&graph);
    for name in ["n0", "n1", "n2", "n3"] {
        assert_eq!(matrix.distance(name, name), Some(0));
    }
}

#[test]
fn test_floyd_warshall_empty_graph() {
    let graph = GraphStore::new();
    let matrix = floyd_warshall(&graph);
    assert!(matrix.is_empty());
    assert_eq!(matrix.closer_than(10, "anything"), None);
}

#[test]
fn test_self_loop_does_not_shorten_diagonal() {
    let mut graph = GraphStore::new();
    graph.insert_node("a");
    graph.insert_node("b");
    graph.upsert_edge("a", "a", 5);
    graph.upsert_edge("a", "b", 1);
    let matrix = floyd_warshall(&graph);
    assert_eq!(matrix.distance("a", "a"), Some(0));
    assert_eq!(matrix.distance("a", "b"), Some(1));
}

#[test]
fn test_algorithms_agree_after_mutations() {
    let mut graph = build_test_graph();
    graph.remove_node("n1");
    graph.insert_node("n4");
    graph.upsert_edge("n0", "n4", 2);
    graph.upsert_edge("n4", "n3", 1);

    let matrix = floyd_warshall(&graph);
    for (u, from) in graph.nodes() {
        let dist = dijkstra(&graph, u);
        for (v, to) in graph.nodes() {
            assert_eq!(
                matrix.distance(from, to),
                dist.get(&v).copied(),
                "disagreement for {} -> {}",
                from,
                to
            );
        }
    }
}

#[test]
fn test_closer_than_excludes_source_with_cycle() {
    // A cycle brings the walk back to the source; the source itself must
    // still be excluded from the result.
    let mut graph = GraphStore::new();
    for name in ["a", "b", "c"] {
        graph.insert_node(name);
    }
    graph.upsert_edge("a", "b", 1);
    graph.upsert_edge("b", "c", 1);
    graph.upsert_edge("c", "a", 1);
    let matrix = floyd_warshall(&graph);
    assert_eq!(
        matrix.closer_than(100, "a"),
        Some(vec!["b".to_string(), "c".to_string()])
    );
}
