//! JSON interchange form of networks.

use sortnet::{build_network, run, Error, Family, Network, NetworkStats, VerificationResult};

#[test]
fn round_trip_preserves_layers_and_order() {
    for family in Family::ALL {
        let net = build_network(family, 16).unwrap();
        let json = net.to_json().unwrap();
        let back = Network::from_json(&json).unwrap();
        assert_eq!(back, net, "{family}");
        assert_eq!(back.to_json().unwrap(), json);
    }
}

#[test]
fn fixture_loads_and_sorts() {
    let json = r#"{
        "wire_count": 4,
        "layers": [
            [[0, 1], [2, 3]],
            [[0, 2], [1, 3]],
            [[1, 2]]
        ]
    }"#;
    let net = Network::from_json(json).unwrap();
    assert_eq!(net.depth(), 3);
    assert_eq!(net.comparator_count(), 5);
    assert_eq!(run(&net, &['d', 'c', 'b', 'a']).unwrap(), vec!['a', 'b', 'c', 'd']);
    assert_eq!(net, build_network(Family::BatcherOddEvenMerge, 4).unwrap());
}

#[test]
fn invalid_fixtures_rejected_with_their_variant() {
    let out_of_range = Network::from_json(r#"{"wire_count": 2, "layers": [[[0, 2]]]}"#);
    assert!(matches!(
        out_of_range,
        Err(Error::WireOutOfRange { wire: 2, wire_count: 2 })
    ));

    let overlapping = Network::from_json(r#"{"wire_count": 3, "layers": [[[0, 1], [1, 2]]]}"#);
    assert!(matches!(
        overlapping,
        Err(Error::OverlappingLayer { layer: 0, wire: 1 })
    ));

    let empty_layer = Network::from_json(r#"{"wire_count": 3, "layers": [[[0, 1]], []]}"#);
    assert!(matches!(empty_layer, Err(Error::EmptyLayer { layer: 1 })));

    let self_loop = Network::from_json(r#"{"wire_count": 3, "layers": [[[1, 1]]]}"#);
    assert!(matches!(
        self_loop,
        Err(Error::DegenerateComparator { wire: 1 })
    ));

    let no_wires = Network::from_json(r#"{"wire_count": 0, "layers": []}"#);
    assert!(matches!(no_wires, Err(Error::NoWires)));

    let missing_field = Network::from_json(r#"{"wire_count": 3}"#);
    assert!(matches!(missing_field, Err(Error::Json(_))));
}

#[test]
fn load_reports_invariant_violation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"wire_count": 2, "layers": [[[0, 5]]]}"#).unwrap();
    assert!(matches!(
        Network::load(&path),
        Err(Error::WireOutOfRange { wire: 5, wire_count: 2 })
    ));
}

#[test]
fn save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bitonic-8.json");
    let net = build_network(Family::Bitonic, 8).unwrap();
    net.save(&path).unwrap();
    assert_eq!(Network::load(&path).unwrap(), net);

    let missing = dir.path().join("missing.json");
    assert!(matches!(Network::load(&missing), Err(Error::Io(_))));
}

#[test]
fn reports_serialize() {
    let net = build_network(Family::OddEvenTransposition, 3).unwrap();
    let stats = NetworkStats::of(Family::OddEvenTransposition, &net);
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["family"], "odd_even_transposition");
    assert_eq!(value["depth"], 3);

    let result: VerificationResult = serde_json::from_str(
        r#"{"verified": false, "mode": "sampled", "counterexample": [1, 0], "samples_checked": 7}"#,
    )
    .unwrap();
    assert_eq!(result.counterexample, Some(vec![1, 0]));
    assert!(!result.is_proof());
}
