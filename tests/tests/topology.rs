use prediction_map::{Lane, PredictionMap, TurnType, NO_TURN};
use tests::prediction_map;

fn lane<'a>(map: &'a PredictionMap, id: &str) -> &'a Lane {
    map.lane_by_id(id).unwrap()
}

#[test]
fn relations_to_l21() {
    let map = prediction_map();
    let refs = vec![lane(&map, "l21")];

    assert!(map.is_left_neighbor_lane(Some(lane(&map, "l22")), &refs));
    assert!(map.is_right_neighbor_lane(Some(lane(&map, "l20")), &refs));
    assert!(map.is_predecessor_lane(Some(lane(&map, "l18")), &refs));
    assert!(map.is_successor_lane(Some(lane(&map, "l99")), &refs));
    assert!(map.is_identical_lane(Some(lane(&map, "l21")), &refs));

    assert!(!map.is_left_neighbor_lane(Some(lane(&map, "l20")), &refs));
    assert!(!map.is_right_neighbor_lane(Some(lane(&map, "l22")), &refs));
    assert!(!map.is_successor_lane(Some(lane(&map, "l18")), &refs));
    assert!(!map.is_predecessor_lane(Some(lane(&map, "l10")), &refs));
    assert!(!map.is_identical_lane(Some(lane(&map, "l20")), &refs));
}

#[test]
fn edges_are_directed() {
    let map = prediction_map();
    // l18 says l21 follows it, but l21 doesn't list l18 as a successor
    let refs = vec![lane(&map, "l21")];
    assert!(!map.is_successor_lane(Some(lane(&map, "l18")), &refs));
    let refs = vec![lane(&map, "l18")];
    assert!(map.is_successor_lane(Some(lane(&map, "l21")), &refs));
}

#[test]
fn any_reference_is_enough() {
    let map = prediction_map();
    let refs = vec![lane(&map, "l10"), lane(&map, "l20")];
    assert!(map.is_left_neighbor_lane(Some(lane(&map, "l21")), &refs));
    assert!(map.is_identical_lane(Some(lane(&map, "l10")), &refs));
}

#[test]
fn no_references_allows_anything() {
    let map = prediction_map();
    let l10 = lane(&map, "l10");
    assert!(map.is_left_neighbor_lane(Some(l10), &[]));
    assert!(map.is_right_neighbor_lane(Some(l10), &[]));
    assert!(map.is_successor_lane(Some(l10), &[]));
    assert!(map.is_predecessor_lane(Some(l10), &[]));
    assert!(map.is_identical_lane(Some(l10), &[]));
    assert!(map.is_successor_lane(None, &[]));
}

#[test]
fn missing_candidate() {
    let map = prediction_map();
    let refs = vec![lane(&map, "l21")];
    assert!(!map.is_successor_lane(None, &refs));
    assert!(!map.is_left_neighbor_lane(map.lane_by_id("l500"), &refs));
}

#[test]
fn turn_types() {
    let map = prediction_map();
    assert_eq!(map.lane_turn_type("l20"), NO_TURN);
    assert_eq!(map.lane_turn_type("l20"), 1);
    assert_eq!(map.lane_turn_type("l5"), 3);
    assert_eq!(
        TurnType::from_code(map.lane_turn_type("l5")),
        Some(TurnType::RightTurn)
    );
    // Unknown lanes aren't an error
    assert_eq!(map.lane_turn_type("l500"), 1);
    assert_eq!(map.lane_turn_type(""), NO_TURN);
}

#[test]
fn lane_listing() {
    let map = prediction_map();
    assert_eq!(map.num_lanes(), 7);
    assert_eq!(map.all_lanes().len(), 7);
    let ids: Vec<&str> = map.lane_ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["l10", "l18", "l20", "l21", "l22", "l5", "l99"]);
    assert!(map.lane_by_id("l500").is_none());
}
