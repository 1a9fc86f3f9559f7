//! Offline pipeline orchestration: cluster, score, align, build, write.

use std::path::Path;

use equinet_core::errors::{EquinetError, EquinetResult};
use equinet_core::{CorpusRecord, EquinetConfig};
use equinet_index::{BuildReport, IndexBuilder, Snapshot, SnapshotFiles, write_snapshot};
use tracing::info;

use crate::alignment::{AlignmentReport, GroupAligner};
use crate::clustering::{ClusteringOutcome, PartitionClusterer};
use crate::scoring::{assign_fairness, FairnessReport};

/// Everything one pipeline run produced, besides the snapshot itself.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub clustering: ClusteringOutcome,
    pub fairness: FairnessReport,
    /// `None` when alignment is disabled.
    pub alignment: Option<AlignmentReport>,
    pub build: BuildReport,
}

pub struct FairnessPipeline {
    config: EquinetConfig,
    clusterer: PartitionClusterer,
    aligner: GroupAligner,
}

impl FairnessPipeline {
    pub fn new(config: EquinetConfig) -> Self {
        let clusterer = PartitionClusterer::new(&config.clustering);
        let aligner = GroupAligner::from_config(&config.alignment);
        Self {
            config,
            clusterer,
            aligner,
        }
    }

    pub fn config(&self) -> &EquinetConfig {
        &self.config
    }

    /// Run every offline stage and return the in-memory snapshot.
    ///
    /// # Errors
    /// `ConfigError` for an invalid configuration. `ConstructionError` for
    /// an empty corpus or an embedding whose length
    /// differs from `embedding.dimensions`; otherwise the first stage error.
    pub fn run(
        &self,
        mut records: Vec<CorpusRecord>,
    ) -> EquinetResult<(Snapshot, PipelineReport)> {
        let span = equinet_observability::pipeline_span!(records.len());
        let _guard = span.enter();

        self.check_input(&records)?;

        let clustering = self.clusterer.assign(&mut records)?;
        let fairness = assign_fairness(&mut records);
        let alignment = if self.config.alignment.enabled {
            Some(self.aligner.align(&mut records)?)
        } else {
            None
        };

        let builder =
            IndexBuilder::new(self.config.embedding.dimensions, self.config.index.clone());
        let (snapshot, build) = builder.build(records)?;
        info!(
            snapshot_id = %snapshot.id(),
            clusters = fairness.clusters.len(),
            aligned = alignment.is_some(),
            "pipeline completed"
        );
        Ok((
            snapshot,
            PipelineReport {
                clustering,
                fairness,
                alignment,
                build,
            },
        ))
    }

    /// Run the pipeline and write the snapshot to `dir`. Nothing is written
    /// unless every stage succeeded.
    pub fn run_to_dir(
        &self,
        records: Vec<CorpusRecord>,
        dir: &Path,
    ) -> EquinetResult<(Snapshot, PipelineReport)> {
        let (snapshot, report) = self.run(records)?;
        write_snapshot(&snapshot, dir, &SnapshotFiles::from(&self.config.index))?;
        Ok((snapshot, report))
    }

    fn check_input(&self, records: &[CorpusRecord]) -> EquinetResult<()> {
        self.config.validate()?;
        if records.is_empty() {
            return Err(EquinetError::ConstructionError {
                reason: "corpus is empty".to_string(),
            });
        }
        let expected = self.config.embedding.dimensions;
        if let Some(bad) = records.iter().find(|r| r.embedding.len() != expected) {
            return Err(EquinetError::ConstructionError {
                reason: format!(
                    "record {} has {} dimensions, expected {expected}",
                    bad.metadata.id,
                    bad.embedding.len()
                ),
            });
        }
        Ok(())
    }
}
