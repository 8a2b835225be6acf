//! Tests for the Stakeout core types.

use chrono::{TimeZone, Utc};
use stakeout_core::types::{round_to_grid, EventSet, GridKey, StopEvent};

fn event(lat: f64, lng: f64, y: i32, mo: u32, d: u32, h: u32, method: &str) -> StopEvent {
    StopEvent::new(
        lat,
        lng,
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap(),
        method,
    )
    .unwrap()
}

/// Events landing in the same cell share a grid key across construction paths.
#[test]
fn test_grid_key_joins_events_to_cells() {
    let a = event(38.8951, -77.0364, 2024, 3, 5, 8, "radar");
    let b = event(38.8953, -77.0361, 2024, 3, 6, 9, "laser");

    let key_a = GridKey::from_degrees(a.lat, a.lng, 0.001);
    let key_b = GridKey::from_degrees(b.lat, b.lng, 0.001);
    assert_eq!(key_a, key_b);
    assert_eq!(key_a.id(), "38.895_-77.036");
}

/// Grid keys serialize as their canonical string form.
#[test]
fn test_grid_key_serializes_as_string() {
    let key = GridKey::from_degrees(38.8951, -77.0364, 0.001);
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"38.895_-77.036\"");
}

/// Coarser grids merge neighboring cells.
#[test]
fn test_cell_size_controls_resolution() {
    let fine_a = GridKey::from_degrees(38.891, -77.036, 0.001);
    let fine_b = GridKey::from_degrees(38.894, -77.036, 0.001);
    assert_ne!(fine_a, fine_b);

    let coarse_a = GridKey::from_degrees(38.891, -77.036, 0.01);
    let coarse_b = GridKey::from_degrees(38.894, -77.036, 0.01);
    assert_eq!(coarse_a, coarse_b);
}

/// round_to_grid is idempotent on already-rounded values.
#[test]
fn test_round_to_grid_idempotent() {
    let rounded = round_to_grid(38.89512, 0.001);
    assert_eq!(round_to_grid(rounded, 0.001), rounded);
}

/// An event set freezes events and exposes a deterministic reference time.
#[test]
fn test_event_set_snapshot() {
    let events = vec![
        event(38.895, -77.036, 2024, 1, 10, 8, "radar"),
        event(38.895, -77.036, 2024, 5, 2, 17, "laser"),
        event(38.901, -77.040, 2024, 2, 14, 12, "radar"),
    ];
    let set = EventSet::from_events(events).unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(
        set.reference_time(),
        Utc.with_ymd_and_hms(2024, 5, 2, 17, 0, 0).unwrap()
    );
    // Iteration preserves input order.
    let hours: Vec<u8> = set.iter().map(|e| e.hour).collect();
    assert_eq!(hours, vec![8, 17, 12]);
}

/// Deserialized events pass through the same validation as constructed ones.
#[test]
fn test_deserialized_events_validated() {
    let json = r#"{
        "lat": 38.8951,
        "lng": -77.0364,
        "timestamp": "2024-03-05T08:30:00Z",
        "hour": 8,
        "day_of_week": 1,
        "month": 3,
        "day_of_month": 5,
        "detection_method": "radar"
    }"#;
    let parsed: StopEvent = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.speed_over, None);
    assert!(!parsed.alcohol_involved);

    let set = EventSet::from_events(vec![parsed]).unwrap();
    assert_eq!(set.len(), 1);
}
