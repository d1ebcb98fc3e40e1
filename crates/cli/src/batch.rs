use anyhow::{bail, Context as AnyhowContext, Result};
use serde::Serialize;
use sonus_span_engine::{ConsolidationReport, SpanEngine};
use sonus_tei_io::{read_document, write_document_to};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the output directory created next to the input by default
pub const DEFAULT_OUTPUT_DIR: &str = "postprocessed";

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    pub input: PathBuf,
    /// Absent on dry runs
    pub output: Option<PathBuf>,
    pub report: ConsolidationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedDocument {
    pub input: PathBuf,
    pub reason: String,
}

/// Outcome of one batch run
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub dry_run: bool,
    pub processed: Vec<ProcessedDocument>,
    pub failed: Vec<FailedDocument>,
    pub total: ConsolidationReport,
}

impl BatchSummary {
    pub fn documents(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

pub struct BatchOptions {
    /// Directory the discovered documents are relative to
    pub input_root: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

/// Output directory used when none is given: `postprocessed` beside a file
/// input, inside a directory input
pub fn default_output_dir(input: &Path) -> PathBuf {
    input_root(input).join(DEFAULT_OUTPUT_DIR)
}

/// Directory that relative output paths are computed from
pub fn input_root(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.to_path_buf()
    } else {
        input.parent().map(Path::to_path_buf).unwrap_or_default()
    }
}

/// `.xml` documents under `input`, sorted by file name
///
/// A file input is returned as is. Directories are scanned one level deep
/// unless `recursive`; `skip` (the output directory) is never entered.
pub fn discover_documents(input: &Path, recursive: bool, skip: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("Input path {} does not exist", input.display());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut documents = Vec::new();

    for entry in WalkDir::new(input)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != skip)
    {
        let entry = entry.with_context(|| format!("Failed to scan {}", input.display()))?;
        if entry.file_type().is_file() && is_markup(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    log::debug!("Discovered {} document(s) under {}", documents.len(), input.display());
    Ok(documents)
}

fn is_markup(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

/// Consolidate every document independently
///
/// A document that fails to load, consolidate or write is recorded and
/// skipped; the rest of the batch still runs.
pub fn process_batch(engine: &SpanEngine, documents: &[PathBuf], options: &BatchOptions) -> BatchSummary {
    let mut summary = BatchSummary {
        dry_run: options.dry_run,
        ..BatchSummary::default()
    };

    for input in documents {
        let output = (!options.dry_run).then(|| output_path(input, options));

        match process_document(engine, input, output.as_deref()) {
            Ok(report) => {
                log::info!(
                    "Processed {}: {} change(s)",
                    input.display(),
                    report.total_changes()
                );
                summary.total.accumulate(&report);
                summary.processed.push(ProcessedDocument {
                    input: input.clone(),
                    output,
                    report,
                });
            }
            Err(err) => {
                log::error!("Skipping {}: {err:#}", input.display());
                summary.failed.push(FailedDocument {
                    input: input.clone(),
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    summary
}

fn output_path(input: &Path, options: &BatchOptions) -> PathBuf {
    let relative = input
        .strip_prefix(&options.input_root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .or_else(|| input.file_name().map(Path::new))
        .unwrap_or(input);
    options.output_dir.join(relative)
}

fn process_document(
    engine: &SpanEngine,
    input: &Path,
    output: Option<&Path>,
) -> Result<ConsolidationReport> {
    let mut document = read_document(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let report = engine
        .consolidate(&mut document.root)
        .with_context(|| format!("Failed to consolidate {}", input.display()))?;

    if let Some(output) = output {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        write_document_to(output, &document)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(report)
}
