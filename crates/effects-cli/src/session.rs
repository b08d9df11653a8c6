//! Loading everything a command needs into one session.
//!
//! Only unreadable data files stop a command. A missing or broken config or
//! cost table, or an effect table without the required columns, is logged
//! and replaced by defaults or an empty dataset.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use effects_core::{BanSet, CostTable, Dataset, IdentityNormalizer, compute_candidates};
use effects_ingest::{IngestError, ingest_sheets, load_config, load_cost_table, read_sheets};
use effects_model::{AppConfig, Candidate, CanonicalRow};
use tracing::{info, info_span, warn};

/// Input locations for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionInputs {
    pub data: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub costs: Option<PathBuf>,
}

/// Loaded inputs plus the candidates derived from them.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: AppConfig,
    pub dataset: Dataset,
    pub costs: CostTable,
    pub candidates: Vec<Candidate>,
}

impl Session {
    pub fn load(inputs: &SessionInputs) -> Result<Self> {
        let span = info_span!("load", data = inputs.data.len());
        let _guard = span.enter();

        let identity = IdentityNormalizer::default();
        let config = inputs
            .config
            .as_deref()
            .map(config_or_default)
            .unwrap_or_default();
        let costs = inputs
            .costs
            .as_deref()
            .map(|path| costs_or_empty(path, &identity))
            .unwrap_or_default();
        let rows = load_rows(&inputs.data)?;
        let dataset = Dataset::from_rows(&rows, &identity);
        let candidates = compute_candidates(&dataset, &config, &costs, &BanSet::default());
        info!(
            rows = rows.len(),
            records = dataset.records().len(),
            groups = dataset.group_max_n().len(),
            candidates = candidates.len(),
            "loaded session"
        );

        Ok(Self {
            config,
            dataset,
            costs,
            candidates,
        })
    }
}

fn config_or_default(path: &Path) -> AppConfig {
    load_config(path).unwrap_or_else(|error| {
        warn!(%error, "using default config");
        AppConfig::default()
    })
}

fn costs_or_empty(path: &Path, identity: &IdentityNormalizer) -> CostTable {
    match load_cost_table(path) {
        Ok(entries) => CostTable::from_entries(
            entries.into_iter().map(|entry| (entry.raw_id, entry.cost)),
            identity,
        ),
        Err(error) => {
            warn!(%error, "ignoring cost table");
            CostTable::default()
        }
    }
}

fn load_rows(paths: &[PathBuf]) -> Result<Vec<CanonicalRow>> {
    let sheets = read_sheets(paths).context("read effect tables")?;
    match ingest_sheets(&sheets) {
        Ok(rows) => Ok(rows),
        Err(error @ (IngestError::MissingColumns { .. } | IngestError::NoTables)) => {
            warn!(%error, "no usable effect table, continuing with empty data");
            Ok(Vec::new())
        }
        Err(error) => Err(error).context("ingest effect tables"),
    }
}
