//! Full analysis run orchestration.
//!
//! Executes the six engine phases over one immutable event snapshot and
//! assembles the run's artifacts: signatures, feature vectors, patterns,
//! anomalies, and the discovery summary.

use std::time::Instant;

use serde_json::{json, Value};
use tracing::info;

use stakeout_core::config::StakeoutConfig;
use stakeout_core::types::collections::{BTreeMap, FxHashMap};
use stakeout_core::types::{EventSet, GridKey};

use crate::anomalies::{Anomaly, RecentChangeDetector, SpikeDetector};
use crate::baseline::GlobalBaseline;
use crate::features::{FeatureGenerator, FeatureVector};
use crate::grid::{CellStats, GridIndexer};
use crate::patterns::{DiscoveredPattern, DiscoverySummary, PatternEngine};
use crate::signatures::{LocationSignature, SignatureBuilder};

/// All artifacts of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub signatures: FxHashMap<GridKey, LocationSignature>,
    pub features: Vec<FeatureVector>,
    pub patterns: Vec<DiscoveredPattern>,
    pub anomalies: Vec<Anomaly>,
    pub summary: DiscoverySummary,
}

impl AnalysisReport {
    /// Signatures as a JSON object keyed by grid id.
    ///
    /// Keys route through an ordered map so output bytes are stable across
    /// runs.
    pub fn signatures_to_json(&self) -> Value {
        let ordered: BTreeMap<String, &LocationSignature> = self
            .signatures
            .iter()
            .map(|(key, sig)| (key.id(), sig))
            .collect();
        json!(ordered)
    }

    /// The pattern/anomaly artifact: `{ patterns, anomalies, summary }`.
    pub fn discovery_to_json(&self) -> Value {
        json!({
            "patterns": self.patterns,
            "anomalies": self.anomalies,
            "summary": self.summary,
        })
    }
}

/// Runs the six engine phases in dependency order.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    config: StakeoutConfig,
}

impl AnalysisPipeline {
    pub fn new(config: StakeoutConfig) -> Self {
        Self { config }
    }

    /// Run the full analysis over one event snapshot.
    ///
    /// Infallible by construction: the event set is validated at ingest and
    /// every statistical step has a deterministic fallback.
    pub fn run(&self, events: &EventSet) -> AnalysisReport {
        let started = Instant::now();
        let indexer = GridIndexer::from_config(&self.config.grid);

        // Phase 1: spatial partition + per-cell aggregates.
        let partition = indexer.partition(events);
        let cell_stats = CellStats::for_partition(events, &partition);
        info!(grid_cell_count = partition.len(), "grid partition complete");

        // Phase 2: global baselines.
        let baseline = GlobalBaseline::compute(events);

        // Phase 3: per-cell signatures (parallel map).
        let phase = Instant::now();
        let builder = SignatureBuilder::from_config(&self.config.signatures);
        let signatures = builder.build_all(events, &partition, &baseline);
        info!(
            signature_count = signatures.len(),
            signature_build_time = phase.elapsed().as_millis() as u64,
            "signature build complete"
        );

        // Phase 4: interaction features.
        let generator = FeatureGenerator::new(indexer);
        let features = generator.generate(events, &baseline, &signatures, &cell_stats);
        info!(feature_vector_count = features.len(), "feature generation complete");

        // Phase 5: pattern discovery.
        let phase = Instant::now();
        let engine = PatternEngine::new(self.config.patterns.clone());
        let discovery = engine.discover(events, &signatures, &indexer);
        info!(
            pattern_count = discovery.patterns.len(),
            discovery_time = phase.elapsed().as_millis() as u64,
            "pattern discovery complete"
        );

        // Phase 6: anomaly detection.
        let spike_detector = SpikeDetector::new(self.config.anomalies.effective_z_threshold());
        let mut anomalies = spike_detector.detect(events, &partition, &signatures);
        let recent_detector = RecentChangeDetector::from_config(&self.config.anomalies);
        anomalies.extend(recent_detector.detect(events, &indexer));
        info!(anomaly_count = anomalies.len(), "anomaly detection complete");

        let mut summary = discovery.summary;
        summary.total_anomalies = anomalies.len();
        info!(
            pipeline_time = started.elapsed().as_millis() as u64,
            %summary,
            "analysis run complete"
        );

        AnalysisReport {
            signatures,
            features,
            patterns: discovery.patterns,
            anomalies,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use stakeout_core::types::StopEvent;

    fn synthetic_run() -> EventSet {
        let base = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut events = Vec::new();
        for c in 0..4 {
            let lat = 38.0 + c as f64 * 0.01;
            for week in 0..12 {
                let ts = base + Duration::days(1 + week * 7) + Duration::hours(8);
                events.push(
                    StopEvent::new(lat, -77.0, ts, "radar")
                        .unwrap()
                        .with_speed_over(12.0),
                );
            }
        }
        EventSet::from_events(events).unwrap()
    }

    #[test]
    fn run_produces_consistent_report() {
        let events = synthetic_run();
        let report = AnalysisPipeline::default().run(&events);

        assert_eq!(report.features.len(), events.len());
        assert_eq!(report.signatures.len(), 4);
        assert_eq!(report.summary.total_patterns, report.patterns.len());
        assert_eq!(report.summary.total_anomalies, report.anomalies.len());
    }

    #[test]
    fn json_artifacts_have_contract_shape() {
        let events = synthetic_run();
        let report = AnalysisPipeline::default().run(&events);

        let signatures = report.signatures_to_json();
        let map = signatures.as_object().unwrap();
        assert_eq!(map.len(), 4);
        for (key, sig) in map {
            assert_eq!(sig["grid_id"], *key);
            assert_eq!(sig["hour_distribution"].as_array().unwrap().len(), 24);
            assert_eq!(sig["day_distribution"].as_array().unwrap().len(), 7);
        }

        let discovery = report.discovery_to_json();
        assert!(discovery["patterns"].is_array());
        assert!(discovery["anomalies"].is_array());
        let summary = &discovery["summary"];
        for field in [
            "total_patterns",
            "time_clusters",
            "method_zones",
            "day_patterns",
            "quota_effect_detected",
            "total_anomalies",
        ] {
            assert!(summary.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn identical_inputs_serialize_identically() {
        let events = synthetic_run();
        let pipeline = AnalysisPipeline::default();
        let a = pipeline.run(&events);
        let b = pipeline.run(&events);
        assert_eq!(
            serde_json::to_string(&a.signatures_to_json()).unwrap(),
            serde_json::to_string(&b.signatures_to_json()).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&a.discovery_to_json()).unwrap(),
            serde_json::to_string(&b.discovery_to_json()).unwrap()
        );
    }
}
