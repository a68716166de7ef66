use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::filters::brightness::{Brightness, DEFAULT_BRIGHTNESS_LEVEL};
use crate::filters::grayscale::Grayscale;
use crate::filters::invert::InvertColors;
use crate::filters::{FilterChain, FrameFilter};

/// Default number of worker threads for a run.
pub const DEFAULT_PARALLELISM: usize = 4;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    /// Output container path; derived from the input name when not set.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Filter stages in application order.
    #[serde(default)]
    pub filters: Vec<FilterKind>,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub cancel_policy: CancelPolicy,
}

impl PipelineConfig {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            output: None,
            filters: Vec::new(),
            workers: WorkerConfig::default(),
            cancel_policy: CancelPolicy::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Maximum number of frame jobs executing concurrently. Fixed for the
    /// duration of a run; reconfigurable between runs.
    pub parallelism: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

/// What to do with the output when a run is cancelled mid-flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelPolicy {
    /// Skip the sink phase entirely; no output file is created.
    #[default]
    Abort,
    /// Write whatever frames resolved successfully, in order, with gaps.
    KeepPartial,
}

/// The built-in filter set, as it appears in config files.
///
/// Resolved once into concrete filter values when the chain is built, not
/// per pixel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    Grayscale,
    InvertColors,
    Brightness {
        #[serde(default = "default_brightness_level")]
        level: i16,
    },
}

fn default_brightness_level() -> i16 {
    DEFAULT_BRIGHTNESS_LEVEL
}

impl FilterKind {
    /// Instantiate the concrete filter for this kind.
    pub fn build(&self) -> Arc<dyn FrameFilter> {
        match self {
            Self::Grayscale => Arc::new(Grayscale),
            Self::InvertColors => Arc::new(InvertColors),
            Self::Brightness { level } => Arc::new(Brightness::new(*level)),
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grayscale => write!(f, "Grayscale"),
            Self::InvertColors => write!(f, "Invert Colors"),
            Self::Brightness { level } => write!(f, "Brightness ({level:+})"),
        }
    }
}

/// Build an immutable filter chain from configured filter kinds.
pub fn build_chain(kinds: &[FilterKind]) -> FilterChain {
    FilterChain::with_stages(kinds.iter().map(FilterKind::build).collect())
}

/// Default output path: `<stem>_<YYYYMMDD_HHMMSS>_filtered.rvf` next to the
/// input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("video");
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let name = format!("{stem}_{timestamp}_filtered.rvf");
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
