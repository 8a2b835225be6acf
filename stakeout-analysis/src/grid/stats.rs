//! Per-cell aggregate statistics.
//!
//! Base feature columns derived in the same pass as the grid partition:
//! counts, mean severity, incident-flag shares, and detection-method shares.

use stakeout_core::types::collections::FxHashMap;
use stakeout_core::types::{EventSet, GridKey, StopEvent};

/// Aggregate statistics for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStats {
    pub stop_count: usize,
    pub avg_speed_over: f64,
    pub alcohol_share: f64,
    pub accident_share: f64,
    pub radar_share: f64,
    pub laser_share: f64,
}

impl CellStats {
    /// Compute statistics over one cell's events.
    ///
    /// A cell with no recorded severity values reports 0 for the mean.
    pub fn from_cell(events: &EventSet, indices: &[usize]) -> Self {
        if indices.is_empty() {
            return Self::default();
        }
        let all = events.events();
        let count = indices.len() as f64;

        let mut severity_sum = 0.0;
        let mut severity_count = 0usize;
        let mut alcohol = 0usize;
        let mut accident = 0usize;
        let mut radar = 0usize;
        let mut laser = 0usize;

        for &idx in indices {
            let event: &StopEvent = &all[idx];
            if let Some(speed_over) = event.speed_over {
                severity_sum += speed_over;
                severity_count += 1;
            }
            if event.alcohol_involved {
                alcohol += 1;
            }
            if event.accident_involved {
                accident += 1;
            }
            match event.detection_method.as_str() {
                "radar" => radar += 1,
                "laser" => laser += 1,
                _ => {}
            }
        }

        Self {
            stop_count: indices.len(),
            avg_speed_over: if severity_count > 0 {
                severity_sum / severity_count as f64
            } else {
                0.0
            },
            alcohol_share: alcohol as f64 / count,
            accident_share: accident as f64 / count,
            radar_share: radar as f64 / count,
            laser_share: laser as f64 / count,
        }
    }

    /// Compute statistics for every cell in a partition.
    pub fn for_partition(
        events: &EventSet,
        partition: &FxHashMap<GridKey, Vec<usize>>,
    ) -> FxHashMap<GridKey, CellStats> {
        partition
            .iter()
            .map(|(key, indices)| (*key, Self::from_cell(events, indices)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridIndexer;
    use chrono::{TimeZone, Utc};
    use stakeout_core::types::StopEvent;

    fn event(method: &str, speed_over: Option<f64>, alcohol: bool) -> StopEvent {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let mut e = StopEvent::new(38.895, -77.036, ts, method).unwrap();
        if let Some(s) = speed_over {
            e = e.with_speed_over(s);
        }
        e.with_flags(alcohol, false)
    }

    #[test]
    fn cell_stats_aggregates_shares() {
        let events = EventSet::from_events(vec![
            event("radar", Some(10.0), true),
            event("radar", Some(20.0), false),
            event("laser", None, false),
            event("unknown", None, false),
        ])
        .unwrap();

        let indexer = GridIndexer::new(0.001);
        let partition = indexer.partition(&events);
        let key = indexer.key_for(38.895, -77.036);
        let stats = CellStats::from_cell(&events, &partition[&key]);

        assert_eq!(stats.stop_count, 4);
        assert!((stats.avg_speed_over - 15.0).abs() < 1e-9);
        assert!((stats.alcohol_share - 0.25).abs() < 1e-9);
        assert_eq!(stats.accident_share, 0.0);
        assert!((stats.radar_share - 0.5).abs() < 1e-9);
        assert!((stats.laser_share - 0.25).abs() < 1e-9);
    }

    #[test]
    fn missing_severity_reports_zero_mean() {
        let events = EventSet::from_events(vec![event("radar", None, false)]).unwrap();
        let stats = CellStats::from_cell(&events, &[0]);
        assert_eq!(stats.avg_speed_over, 0.0);
    }
}
