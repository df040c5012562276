mod common;

use georoute_lib::{load_graph, CsvSource, Error};
use tempfile::tempdir;

use common::{fixture_graph, write_csv};

#[test]
fn fixture_loads_all_nodes_and_ways() {
    let graph = fixture_graph();
    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.edge_count(), 11);
}

#[test]
fn blank_distance_falls_back_to_geodesic() {
    let graph = fixture_graph();
    let geodesic = graph.geodesic_distance("n7", "n3").expect("nodes exist");
    let edge = graph
        .neighbours("n7")
        .iter()
        .find(|edge| edge.target == "n3")
        .expect("n7 -> n3 present");

    assert_eq!(edge.distance, geodesic);
    assert!((geodesic - 0.927_169_184_516_160_5).abs() < 1e-9);
}

#[test]
fn empty_name_leaves_node_unnamed() {
    let graph = fixture_graph();
    let node = graph.node("n3").expect("n3 loaded");
    assert!(node.name.is_none());
}

#[test]
fn extra_columns_and_whitespace_are_tolerated() {
    let dir = tempdir().expect("temp dir");
    let nodes = write_csv(
        dir.path(),
        "nodes.csv",
        "name,highway,lon,lat,id\n Foix ,primary, 1.605 , 42.965 ,a\nMontgaillard,,1.63,42.93,b\n",
    );
    let ways = write_csv(
        dir.path(),
        "ways.csv",
        "way_id,node_from,node_to,distance_km\n17,a,b,4.5\n",
    );

    let graph = load_graph(&CsvSource::new(nodes, ways)).expect("loads");
    assert_eq!(graph.resolve_name("Foix"), Some("a"));
    assert_eq!(graph.neighbours("b")[0].distance, 4.5);
}

#[test]
fn malformed_latitude_is_a_csv_error() {
    let dir = tempdir().expect("temp dir");
    let nodes = write_csv(dir.path(), "nodes.csv", "id,lat,lon,name\na,north,1.0,A\n");
    let ways = write_csv(dir.path(), "ways.csv", "node_from,node_to,distance_km\n");

    let err = load_graph(&CsvSource::new(nodes, ways)).expect_err("bad latitude");
    assert!(matches!(err, Error::Csv(_)), "unexpected error: {err}");
}

#[test]
fn negative_distance_in_csv_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let nodes = write_csv(
        dir.path(),
        "nodes.csv",
        "id,lat,lon,name\na,42.0,1.0,A\nb,42.1,1.0,B\n",
    );
    let ways = write_csv(
        dir.path(),
        "ways.csv",
        "node_from,node_to,distance_km\na,b,-3\n",
    );

    let err = load_graph(&CsvSource::new(nodes, ways)).expect_err("negative distance");
    assert_eq!(err.to_string(), "invalid distance -3 km on edge a -> b");
}

#[test]
fn dangling_ways_are_skipped() {
    let dir = tempdir().expect("temp dir");
    let nodes = write_csv(dir.path(), "nodes.csv", "id,lat,lon,name\na,42.0,1.0,A\n");
    let ways = write_csv(
        dir.path(),
        "ways.csv",
        "node_from,node_to,distance_km\na,ghost,1.0\n",
    );

    let graph = load_graph(&CsvSource::new(nodes, ways)).expect("loads");
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.neighbours("a").is_empty());
}

#[test]
fn missing_ways_file_is_reported_with_path() {
    let dir = tempdir().expect("temp dir");
    let nodes = write_csv(dir.path(), "nodes.csv", "id,lat,lon,name\n");
    let ways = dir.path().join("absent.csv");

    let err = load_graph(&CsvSource::new(nodes, &ways)).expect_err("missing ways");
    assert!(err.to_string().contains("absent.csv"));
}
