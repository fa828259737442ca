use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use abstutil::Timer;
use geom::{Distance, Pt2D};
use prediction_map::{MapConfig, MapError, MapHandle, RoadNetwork, MAP_FILE_ENV_VAR};
use tests::{network, raw_network, scratch_path};

#[test]
fn load_json_lazily() {
    abstutil::logger::setup_for_tests();
    let path = scratch_path("lanes.json");
    abstutil::write_json(&path, &raw_network()).unwrap();

    let handle = MapHandle::new(MapConfig::new(path.clone()));
    assert!(!handle.is_loaded());
    let map = handle.get().unwrap();
    assert!(handle.is_loaded());
    assert_eq!(map.num_lanes(), 7);
    assert_eq!(map.lane_turn_type("l5"), 3);
    assert_eq!(map.network().get_name(), "three parallel lanes");

    // The same map every time
    let again = handle.get().unwrap();
    assert!(std::ptr::eq(map, again));

    cleanup(&path);
}

#[test]
fn load_binary() -> Result<()> {
    let path = scratch_path("lanes.bin");
    abstutil::write_binary(&path, &raw_network())?;

    let network = RoadNetwork::load(&path, &mut Timer::throwaway())?;
    let l21 = network.lane_by_id("l21").context("l21 is missing")?;
    assert_eq!(l21.length(), Distance::meters(40.0));
    assert!(l21.contains_pt(Pt2D::new(120.0, 304.0)));

    cleanup(&path);
    Ok(())
}

#[test]
fn fixture_network_builds() -> Result<()> {
    let network = network()?;
    assert_eq!(network.get_name(), "three parallel lanes");
    assert!(network.lane_by_id("l99").is_some());

    let mut raw = raw_network();
    raw.lanes[0].waypoints[1].x = f64::NAN;
    let err = RoadNetwork::create_from_raw(raw, &mut Timer::throwaway())
        .err()
        .context("a NaN waypoint was accepted")?;
    assert!(err.to_string().contains("l20"), "{}", err);
    Ok(())
}

#[test]
fn broken_map_fails_every_time() {
    let path = scratch_path("broken.json");
    let mut raw = raw_network();
    raw.lanes[1].waypoints.truncate(1);
    abstutil::write_json(&path, &raw).unwrap();

    let handle = MapHandle::new(MapConfig::new(path.clone()));
    let first = handle.get().err().unwrap();
    assert!(matches!(first, MapError::Init(_)));
    assert!(first.to_string().contains("l21"), "{}", first);
    assert_eq!(first.code(), -2);
    assert_eq!(handle.get().err(), Some(first));

    cleanup(&path);
}

#[test]
fn concurrent_first_use() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let handle = MapHandle::with_loader(MapConfig::default(), move |_, timer| {
        counter.fetch_add(1, Ordering::SeqCst);
        RoadNetwork::create_from_raw(raw_network(), timer)
    });

    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| handle.get().map(|map| map.num_lanes())))
            .collect();
        for worker in workers {
            assert_eq!(worker.join().unwrap(), Ok(7));
        }
    });
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn config_file() -> Result<()> {
    let path = scratch_path("config.json");
    fs_err::write(
        &path,
        r#"{"map_file": "/maps/sunnyvale.bin", "max_lane_angle_diff": 1.0}"#,
    )?;
    let mut config = MapConfig::load(&path)?;
    assert_eq!(config.map_file, "/maps/sunnyvale.bin");
    assert_eq!(config.max_lane_angle_diff, 1.0);

    std::env::set_var(MAP_FILE_ENV_VAR, "/maps/elsewhere.bin");
    config.apply_env();
    std::env::remove_var(MAP_FILE_ENV_VAR);
    assert_eq!(config.map_file, "/maps/elsewhere.bin");

    cleanup(&path);
    Ok(())
}

fn cleanup(path: &str) {
    let _ = fs_err::remove_file(path);
}
