mod common;

use metroroute_lib::{CostDimension, RouteConstraints, RouteEngine};

use common::builtin;

#[test]
fn fuzzy_matches_returns_similar_names() {
    let network = builtin();
    let locations = network.locations();

    let typo = locations.fuzzy_matches("Halfway Tre", 3);
    assert!(typo.contains(&"Halfway Tree".to_string()));

    let partial = locations.fuzzy_matches("papin", 3);
    assert!(partial.contains(&"Papine".to_string()));
}

#[test]
fn unknown_location_includes_suggestions() {
    let network = builtin();
    let engine = RouteEngine::new(&network);

    let err = engine
        .find_shortest_route(
            "Spansh Town",
            "papine",
            CostDimension::Distance,
            &RouteConstraints::default(),
        )
        .expect_err("should fail with unknown location");

    let message = err.to_string();
    assert!(message.contains("unknown location"));
    assert!(message.contains("Did you mean"));
    assert!(message.contains("Spanish Town"));
}

#[test]
fn fuzzy_matches_respects_limit() {
    let network = builtin();
    assert!(network.locations().fuzzy_matches("Mona", 1).len() <= 1);
}

#[test]
fn fuzzy_matches_filters_low_similarity() {
    let network = builtin();
    assert!(network.locations().fuzzy_matches("zzzzzz", 3).is_empty());
}

#[test]
fn resolve_accepts_names_and_unique_prefixes() {
    let network = builtin();
    let locations = network.locations();
    assert_eq!(locations.resolve("Port Royal").expect("name"), "port_royal");
    assert_eq!(locations.resolve("univ").expect("prefix"), "university_hospital");
    assert!(locations.resolve("Mon").is_err(), "Mona and Mona Heights are ambiguous");
}
