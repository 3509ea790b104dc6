mod common;

use metroroute_lib::{
    CostDimension, Error, RoadRules, RouteAlgorithm, RouteConstraints, RouteEngine,
    RouteOutcome,
};

use common::{builtin, network};

fn line_network() -> metroroute_lib::RoadNetwork {
    network(
        &[("x", 0.0, 0.0), ("y", 0.0, 0.01), ("z", 0.0, 0.02)],
        &[("x", "y", 5.0), ("y", "z", 5.0), ("x", "z", 11.0)],
        RoadRules::default(),
    )
}

#[test]
fn relaxation_prefers_two_short_legs_over_long_direct_edge() {
    let network = line_network();
    let engine = RouteEngine::new(&network);

    let outcome = engine
        .find_shortest_route("x", "z", CostDimension::Distance, &RouteConstraints::default())
        .expect("valid request");
    let route = outcome.route().expect("route exists");

    assert_eq!(route.path, vec!["x", "y", "z"]);
    assert!((route.distance - 10.0).abs() < 1e-12);
    assert_eq!(route.path_names, vec!["X", "Y", "Z"]);
    assert_eq!(route.hop_count(), 2);
    assert!(route.nodes_visited > 0);
    assert!(route.edge_relaxations > 0);
}

#[test]
fn a_star_finds_the_same_path_on_the_line() {
    let network = line_network();
    let engine = RouteEngine::new(&network);

    let outcome = engine
        .search(
            RouteAlgorithm::AStar,
            "x",
            "z",
            CostDimension::Distance,
            &RouteConstraints::default(),
        )
        .expect("valid request");
    let route = outcome.route().expect("route exists");
    assert_eq!(route.path, vec!["x", "y", "z"]);
    assert_eq!(route.algorithm, RouteAlgorithm::AStar);
}

#[test]
fn same_endpoints_are_not_found_with_zero_counters() {
    let network = builtin();
    let engine = RouteEngine::new(&network);

    let outcome = engine
        .find_shortest_route(
            "halfway_tree",
            "halfway_tree",
            CostDimension::Distance,
            &RouteConstraints::default(),
        )
        .expect("same endpoints are not an error");

    match outcome {
        RouteOutcome::NotFound(not_found) => {
            assert_eq!(not_found.algorithm, RouteAlgorithm::Dijkstra);
            assert_eq!(not_found.nodes_visited, 0);
            assert_eq!(not_found.edge_relaxations, 0);
            assert_eq!(not_found.execution_time_ms, 0.0);
        }
        RouteOutcome::Found(route) => panic!("unexpected route {:?}", route.path),
    }
}

#[test]
fn unknown_location_fails_before_searching() {
    let network = builtin();
    let engine = RouteEngine::new(&network);

    let err = engine
        .find_fastest_route("halfway_tree", "atlantis", &RouteConstraints::default())
        .expect_err("unknown destination");
    assert!(matches!(err, Error::UnknownLocation { ref name, .. } if name == "atlantis"));
}

#[test]
fn a_star_never_beats_dijkstra_on_distance() {
    let network = builtin();
    let engine = RouteEngine::new(&network);
    let constraints = RouteConstraints::default();
    let ids: Vec<_> = network.locations().ids().cloned().collect();

    for source in &ids {
        for destination in &ids {
            if source == destination {
                continue;
            }
            let dijkstra = engine
                .search(
                    RouteAlgorithm::Dijkstra,
                    source,
                    destination,
                    CostDimension::Distance,
                    &constraints,
                )
                .expect("search runs")
                .into_route()
                .expect("complete graph always has a path");
            let a_star = engine
                .search(
                    RouteAlgorithm::AStar,
                    source,
                    destination,
                    CostDimension::Distance,
                    &constraints,
                )
                .expect("search runs")
                .into_route()
                .expect("complete graph always has a path");

            assert!(
                dijkstra.distance <= a_star.distance + 1e-9,
                "{source} -> {destination}: dijkstra {} vs a* {}",
                dijkstra.distance,
                a_star.distance
            );
        }
    }
}

#[test]
fn reported_totals_match_the_matrix_along_the_path() {
    let network = builtin();
    let engine = RouteEngine::new(&network);
    let constraints = RouteConstraints::default();
    let ids: Vec<_> = network.locations().ids().cloned().collect();

    for source in &ids {
        for destination in &ids {
            if source == destination {
                continue;
            }
            let route = engine
                .find_fastest_route(source, destination, &constraints)
                .expect("search runs")
                .into_route()
                .expect("path exists");

            let mut distance = 0.0;
            let mut time = 0.0;
            for leg in route.path.windows(2) {
                let cost = network.matrix().cost(&leg[0], &leg[1]).expect("entry");
                distance += cost.distance;
                time += cost.time;
            }
            assert!((route.distance - distance).abs() < 1e-9);
            assert!((route.time - time).abs() < 1e-9);
            assert_eq!(route.path.first(), Some(source));
            assert_eq!(route.path.last(), Some(destination));
        }
    }
}

#[test]
fn repeated_searches_are_identical() {
    let network = builtin();
    let engine = RouteEngine::new(&network);
    let constraints = RouteConstraints {
        avoid_highways: true,
        ..RouteConstraints::default()
    };

    // `None` runs the fastest-route search, `Some` the shortest in that dimension.
    let run = |shortest: Option<CostDimension>| {
        let outcome = match shortest {
            Some(dimension) => {
                engine.find_shortest_route("port_royal", "papine", dimension, &constraints)
            }
            None => engine.find_fastest_route("port_royal", "papine", &constraints),
        };
        outcome
            .expect("search runs")
            .into_route()
            .expect("path exists")
    };

    for shortest in [None, Some(CostDimension::Distance), Some(CostDimension::Time)] {
        let first = run(shortest);
        let second = run(shortest);

        assert_eq!(first.path, second.path);
        assert_eq!(first.distance, second.distance);
        assert_eq!(first.time, second.time);
        assert_eq!(first.nodes_visited, second.nodes_visited);
        assert_eq!(first.edge_relaxations, second.edge_relaxations);
        assert_eq!(first.highways_used, second.highways_used);
        assert_eq!(
            first.used_highway_despite_avoidance,
            second.used_highway_despite_avoidance
        );
    }
}

#[test]
fn engine_can_be_shared_across_threads() {
    let network = builtin();
    let engine = RouteEngine::new(&network);

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["papine", "mona", "barbican"]
            .into_iter()
            .map(|destination| {
                scope.spawn(move || {
                    engine
                        .find_shortest_route(
                            "halfway_tree",
                            destination,
                            CostDimension::Distance,
                            &RouteConstraints::default(),
                        )
                        .expect("search runs")
                        .is_found()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("thread completes"));
        }
    });
}

#[test]
fn not_found_is_labelled_with_the_planner_that_ran() {
    let network = builtin();
    let engine = RouteEngine::new(&network);

    for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar] {
        let outcome = engine
            .search(
                algorithm,
                "papine",
                "papine",
                CostDimension::Time,
                &RouteConstraints::default(),
            )
            .expect("same endpoints are not an error");

        assert!(!outcome.is_found());
        assert_eq!(outcome.algorithm(), algorithm);
        if let RouteOutcome::NotFound(not_found) = outcome {
            assert_eq!(not_found.algorithm_info, algorithm.info());
        }
    }
}
