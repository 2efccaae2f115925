//! Per-file parallel generation.
//!
//! Files are independent: each one is classified, emitted and written to
//! text on its own rayon task. The [`TypePool`] is the only shared
//! structure, and it is append-only.

use rayon::prelude::*;
use ssg_codegen::{generate_unit, write_unit};
use ssg_ir::{SourceUnit, TypePool, WellKnown};

use crate::{Diagnostic, DiagnosticBag, DriverError, GeneratorConfig, ProjectLayout};

/// Configuration for parallel generation.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParallelConfig {
    /// Number of threads to use (0 = rayon's default).
    pub num_threads: usize,
}

impl ParallelConfig {
    pub fn single_threaded() -> Self {
        ParallelConfig { num_threads: 1 }
    }

    pub fn with_threads(num_threads: usize) -> Self {
        ParallelConfig { num_threads }
    }

    /// Get the effective number of threads.
    pub fn effective_threads(&self) -> usize {
        if self.num_threads == 0 {
            rayon::current_num_threads()
        } else {
            self.num_threads
        }
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool, DriverError> {
        Ok(rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()?)
    }
}

/// Generated text for one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output name, unique per source file within the project.
    pub hint_name: String,
    pub text: String,
}

/// Why a file was not considered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The control file turned generation off.
    Disabled,
    /// The file does not live under the project's `Assets` folder.
    OutsideAssets,
}

/// What happened to one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Generated(GeneratedFile),
    /// Nothing in the file needed generation.
    Empty,
    Skipped(SkipReason),
    /// Generation aborted; the file's error is in the report diagnostics.
    Failed,
}

/// Outcome and diagnostics for one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub outcome: FileOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reports for a whole pass, in input order.
#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    pub files: Vec<FileReport>,
}

impl GenerationReport {
    pub fn generated(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Generated(file) => Some(file),
            _ => None,
        })
    }

    /// All diagnostics, file by file.
    pub fn diagnostics(&self) -> DiagnosticBag {
        let mut bag = DiagnosticBag::new();
        for file in &self.files {
            bag.extend(file.diagnostics.iter().cloned());
        }
        bag
    }
}

/// Runs generation over the units of one pass.
pub struct Generator<'a> {
    pool: &'a TypePool,
    wk: WellKnown,
    layout: ProjectLayout,
    config: GeneratorConfig,
    parallel: ParallelConfig,
}

impl<'a> Generator<'a> {
    /// Well-known symbols are resolved into `pool` here, once per pass.
    pub fn new(pool: &'a TypePool, layout: ProjectLayout, config: GeneratorConfig) -> Self {
        Generator {
            pool,
            wk: WellKnown::resolve(pool),
            layout,
            config,
            parallel: ParallelConfig::default(),
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Generate every unit. Reports come back in input order.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(units = units.len(), threads = self.parallel.effective_threads())
    )]
    pub fn run(&self, units: &[SourceUnit]) -> Result<GenerationReport, DriverError> {
        if !self.config.generate {
            tracing::debug!("generation disabled by control file");
            let files = units
                .iter()
                .map(|unit| FileReport {
                    path: unit.path.clone(),
                    outcome: FileOutcome::Skipped(SkipReason::Disabled),
                    diagnostics: Vec::new(),
                })
                .collect();
            return Ok(GenerationReport { files });
        }

        let pool = self.parallel.build_pool()?;
        let files = pool.install(|| units.par_iter().map(|unit| self.process(unit)).collect());
        Ok(GenerationReport { files })
    }

    /// Generate one file.
    pub fn process(&self, unit: &SourceUnit) -> FileReport {
        let report = |outcome, diagnostics| FileReport {
            path: unit.path.clone(),
            outcome,
            diagnostics,
        };

        let Some(hint_name) = self.layout.output_name(&unit.path) else {
            tracing::debug!(path = %unit.path, "outside Assets, skipped");
            return report(FileOutcome::Skipped(SkipReason::OutsideAssets), Vec::new());
        };

        let output = match generate_unit(self.pool, &self.wk, unit) {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(path = %unit.path, error = %err, "file generation failed");
                let diag = Diagnostic::from_emit_error(&err, &unit.path);
                return report(FileOutcome::Failed, vec![diag]);
            }
        };

        let diagnostics: Vec<Diagnostic> = output
            .skipped
            .iter()
            .map(|err| Diagnostic::from_emit_error(err, &unit.path))
            .collect();

        match write_unit(&output) {
            Some(text) => {
                tracing::debug!(path = %unit.path, %hint_name, bytes = text.len(), "generated");
                report(
                    FileOutcome::Generated(GeneratedFile { hint_name, text }),
                    diagnostics,
                )
            }
            None => report(FileOutcome::Empty, diagnostics),
        }
    }
}
