use ambulance_cds::utils::logging::{
    init_logging, log_assessment, log_operation_start, log_records_loaded,
};
use ambulance_cds::{
    EngineConfig, InferenceEngine, RawRecord, VitalsSnapshot, assess_batch, normalize_records,
    rank_by_priority,
};
use anyhow::{Context, Result, bail};
use log::info;
use rustc_hash::FxHashMap;
use std::path::Path;
use std::time::{Duration, Instant};

const DEFAULT_INTERVAL_MS: u64 = 2000;

/// Group snapshots by patient, patients in first-seen order
fn group_by_patient(snapshots: Vec<VitalsSnapshot>) -> Vec<(String, Vec<VitalsSnapshot>)> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut histories: Vec<(String, Vec<VitalsSnapshot>)> = Vec::new();
    for snapshot in snapshots {
        let slot = *index.entry(snapshot.patient_id.clone()).or_insert_with(|| {
            histories.push((snapshot.patient_id.clone(), Vec::new()));
            histories.len() - 1
        });
        histories[slot].1.push(snapshot);
    }
    histories
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info");

    let mut args = std::env::args().skip(1);
    let Some(records_arg) = args.next() else {
        bail!("Usage: ambulance-cds <records.json> [config.json] [interval_ms]");
    };
    let records_path = Path::new(&records_arg);

    let config = match args.next() {
        Some(config_path) => EngineConfig::from_json_file(Path::new(&config_path))
            .with_context(|| format!("loading configuration from {config_path}"))?,
        None => EngineConfig::default(),
    };
    let interval_ms = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("invalid interval '{raw}'"))?,
        None => DEFAULT_INTERVAL_MS,
    };
    info!("{config}");

    let start = Instant::now();
    log_operation_start("Reading vitals records from", records_path);
    let contents = tokio::fs::read_to_string(records_path)
        .await
        .with_context(|| format!("reading {}", records_path.display()))?;
    let records = RawRecord::many_from_json_str(&contents)?;
    let snapshots = normalize_records(&records)?;
    let histories = group_by_patient(snapshots);
    log_records_loaded(records_path, records.len(), histories.len(), start.elapsed());

    let engine = InferenceEngine::with_reference_classifiers(config);
    let steps = histories
        .iter()
        .map(|(_, history)| history.len())
        .max()
        .unwrap_or(0);

    // Live feed: each tick shows every patient's record at `step`,
    // holding on the last one once a history runs out
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    for step in 0..steps {
        ticker.tick().await;

        let current: Vec<VitalsSnapshot> = histories
            .iter()
            .filter_map(|(_, history)| history.get(step).or_else(|| history.last()))
            .cloned()
            .collect();

        let mut assessments = assess_batch(&engine, &current);
        rank_by_priority(&mut assessments);
        for assessment in &assessments {
            log_assessment(step, assessment);
        }
    }

    info!("Live feed finished after {steps} steps");
    Ok(())
}
