//! Per-run job context.

use chrono::Local;
use std::path::{Path, PathBuf};

use molforge_common::Result;

/// One discovery run. Created at request time and passed explicitly into the
/// round controller and exporter; there is no process-global job state.
#[derive(Debug, Clone)]
pub struct Job {
    job_id: String,
    results_path: PathBuf,
    image_dir: PathBuf,
}

impl Job {
    /// Create a job with a timestamp-derived id. The id is sortable, so the
    /// lexicographically-latest `results/job_*` directory is the newest run.
    pub fn create(results_base: &Path, image_dir: &Path) -> Result<Self> {
        let job_id = Local::now().format("job_%Y%m%d_%H%M%S").to_string();
        Self::with_id(job_id, results_base, image_dir)
    }

    /// Fixed-id constructor, used by tests.
    pub fn with_id(job_id: String, results_base: &Path, image_dir: &Path) -> Result<Self> {
        let results_path = results_base.join(&job_id);
        std::fs::create_dir_all(&results_path)?;
        std::fs::create_dir_all(image_dir)?;
        Ok(Self { job_id, results_path, image_dir: image_dir.to_path_buf() })
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    /// Depiction path for one structure in one round. Job id and round make
    /// the name collision-free across rounds and runs; the SMILES part is
    /// sanitised because structures may contain `/` and `\`.
    pub fn image_path(&self, round_id: u32, smiles: &str) -> PathBuf {
        let safe: String = smiles
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.image_dir.join(format!("{}_r{}_{}.svg", self.job_id, round_id, safe))
    }
}
