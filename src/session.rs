//! # Batch Conversion Session
//!
//! High-level orchestration for converting a list of files into one slot.
//! A session owns the input list, the resolved options, and the progress
//! callback; `run()` executes the batch on the calling thread and `spawn()`
//! moves the same loop onto one background worker thread, the way an
//! interactive frontend keeps its UI thread free.
//!
//! ## Batch contract
//!
//! - the output directory `<out>/<slot>_<YYYYMMDD_HHMMSS>` is created once,
//!   with the timestamp captured at batch start and shared by every file
//! - files are processed sequentially in input order; the progress callback
//!   fires after every file with monotonically increasing counts
//! - per-file failures are recorded and never stop the loop; only failing to
//!   create the batch directory aborts the run
//! - cancellation stops before the next file and returns the partial summary

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::{anyhow, Result};

use crate::error::{ConvertError, ConvertResult};
use crate::processing::Converter;
use crate::ConvertOptions;

/// What happened to one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: ConvertResult<PathBuf>,
}

/// End-of-batch report.
#[derive(Debug)]
pub struct BatchSummary {
    pub success_count: usize,
    pub total_count: usize,
    pub outcomes: Vec<FileOutcome>,
    pub batch_dir: PathBuf,
    pub cancelled: bool,
}

type ProgressFn = Box<dyn FnMut(usize, usize) + Send>;

/// One batch of conversions. Build with [`BatchSession::builder`].
pub struct BatchSession {
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    options: ConvertOptions,
    auto_rename: bool,
    progress: Option<ProgressFn>,
    cancel: Arc<AtomicBool>,
}

impl BatchSession {
    pub fn builder() -> BatchSessionBuilder {
        BatchSessionBuilder::new()
    }

    /// Shared flag that stops the batch before its next file.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Run the batch on the calling thread.
    ///
    /// Per-file errors land in the summary's outcomes; the only error
    /// returned here is the batch-fatal directory setup failure.
    pub fn run(mut self) -> ConvertResult<BatchSummary> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let batch_dir = self
            .output_dir
            .join(format!("{}_{}", self.options.slot.name(), stamp));
        std::fs::create_dir_all(&batch_dir)
            .map_err(|e| ConvertError::batch_setup(&batch_dir, e))?;

        let converter = Converter::new(self.options);
        let total = self.inputs.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut success_count = 0;
        let mut cancelled = false;

        for input in &self.inputs {
            if self.cancel.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }

            let output = batch_dir.join(output_file_name(
                input,
                converter.options().slot.name(),
                self.auto_rename,
            ));
            let result = converter.convert_file(input, &output);
            match &result {
                Ok(_) => success_count += 1,
                Err(e) => log::warn!("failed to convert {}: {}", input.display(), e),
            }
            outcomes.push(FileOutcome {
                input: input.clone(),
                result,
            });

            if let Some(progress) = self.progress.as_mut() {
                progress(outcomes.len(), total);
            }
        }

        Ok(BatchSummary {
            success_count,
            total_count: total,
            outcomes,
            batch_dir,
            cancelled,
        })
    }

    /// Run the batch on one background worker thread.
    pub fn spawn(self) -> BatchHandle {
        let cancel = self.cancel_handle();
        let handle = std::thread::spawn(move || self.run());
        BatchHandle { handle, cancel }
    }
}

/// Handle to a batch running on a worker thread.
pub struct BatchHandle {
    handle: JoinHandle<ConvertResult<BatchSummary>>,
    cancel: Arc<AtomicBool>,
}

impl BatchHandle {
    /// Request a stop before the next file. Already-started work finishes.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn join(self) -> ConvertResult<BatchSummary> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => Err(ConvertError::io(
                "batch worker",
                std::io::Error::other("worker thread panicked"),
            )),
        }
    }
}

/// Builder for batch sessions.
pub struct BatchSessionBuilder {
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    options: Option<ConvertOptions>,
    auto_rename: bool,
    progress: Option<ProgressFn>,
}

impl BatchSessionBuilder {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: None,
            options: None,
            auto_rename: false,
            progress: None,
        }
    }

    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn auto_rename(mut self, enabled: bool) -> Self {
        self.auto_rename = enabled;
        self
    }

    /// Progress callback, called as `(completed, total)` after every file.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, usize) + Send + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<BatchSession> {
        let output_dir = self
            .output_dir
            .ok_or_else(|| anyhow!("no output directory specified"))?;
        let options = self
            .options
            .ok_or_else(|| anyhow!("no conversion options specified"))?;

        Ok(BatchSession {
            inputs: self.inputs,
            output_dir,
            options,
            auto_rename: self.auto_rename,
            progress: self.progress,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }
}

impl Default for BatchSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic output name for one input: `{basename}.png`, or
/// `{basename}_{slot}.png` under auto-rename.
fn output_file_name(input: &Path, slot_name: &str, auto_rename: bool) -> String {
    let base = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    if auto_rename {
        format!("{}_{}.png", base, slot_name)
    } else {
        format!("{}.png", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opl_scale::SlotKind;

    #[test]
    fn output_names_follow_the_rename_toggle() {
        let input = Path::new("/covers/Ridge Racer V.jpg");
        assert_eq!(
            output_file_name(input, "cover", false),
            "Ridge Racer V.png"
        );
        assert_eq!(
            output_file_name(input, "cover", true),
            "Ridge Racer V_cover.png"
        );
    }

    #[test]
    fn builder_requires_destination_and_options() {
        assert!(BatchSession::builder().build().is_err());
        assert!(BatchSession::builder()
            .with_output_dir("/tmp/out")
            .build()
            .is_err());
        assert!(BatchSession::builder()
            .with_output_dir("/tmp/out")
            .with_options(ConvertOptions::new(SlotKind::Cover))
            .build()
            .is_ok());
    }
}
