#![allow(dead_code)]

use std::collections::BTreeMap;

use metroroute_lib::{
    CostMatrix, HubRoute, HubTable, LocationRecord, LocationTable, MatrixTables, RoadClassifier,
    RoadNetwork, RoadRules,
};

pub fn builtin() -> RoadNetwork {
    RoadNetwork::builtin().expect("builtin dataset loads")
}

/// Build a network with an explicit symmetric matrix. Time equals distance.
pub fn network(
    points: &[(&str, f64, f64)],
    edges: &[(&str, &str, f64)],
    rules: RoadRules,
) -> RoadNetwork {
    network_with_hubs(points, edges, rules, Vec::new())
}

/// Same as [`network`], with hub entries for alternative routing.
pub fn network_with_hubs(
    points: &[(&str, f64, f64)],
    edges: &[(&str, &str, f64)],
    rules: RoadRules,
    hubs: Vec<HubRoute>,
) -> RoadNetwork {
    let locations = LocationTable::from_records(points.iter().map(|(id, lat, lng)| {
        (
            id.to_string(),
            LocationRecord {
                lat: *lat,
                lng: *lng,
                display_name: id.to_uppercase(),
            },
        )
    }))
    .expect("valid locations");

    let mut tables = MatrixTables::default();
    for (a, b, cost) in edges {
        for (from, to) in [(a, b), (b, a)] {
            tables
                .distances
                .entry(from.to_string())
                .or_insert_with(BTreeMap::new)
                .insert(to.to_string(), *cost);
            tables
                .times
                .entry(from.to_string())
                .or_insert_with(BTreeMap::new)
                .insert(to.to_string(), *cost);
        }
    }

    let classifier = RoadClassifier::validated(&rules, &locations).expect("valid rules");
    let matrix = CostMatrix::from_tables(tables).expect("matrix tables agree");
    RoadNetwork::new(locations, classifier, matrix, HubTable::new(hubs)).expect("valid network")
}

pub fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}
