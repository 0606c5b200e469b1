//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use super::controller::CountsPolicy;
use super::views::ViewConfig;
use crate::core::{BellError, BellStateSelector, Result};
use crate::simulation::SimulatorConfig;

/// Interactive explorer for the four Bell states.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bellview",
    about = "Cycle through the four Bell states and watch every view update",
    version
)]
pub struct Config {
    /// Bell state shown first: phi-plus, phi-minus, psi-plus, psi-minus, or 0..3.
    #[arg(long, default_value = "phi-plus", value_parser = parse_selector)]
    pub initial: BellStateSelector,

    /// Measurement shots per histogram.
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u64).range(1..))]
    pub shots: u64,

    /// Seed for measurement sampling; drawn from the OS when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance between amplitude-grid cells, in terminal cells. At least 2 so
    /// that two-character basis labels fit.
    #[arg(long = "cell-pitch", default_value_t = 3, value_parser = clap::value_parser!(u32).range(2..=16))]
    pub cell_pitch: u32,

    /// Write each rendered view here and display the copy read back.
    #[arg(long = "asset-dir")]
    pub asset_dir: Option<PathBuf>,

    /// Sample counts once per Bell state instead of on every visit.
    #[arg(long = "cache-counts")]
    pub cache_counts: bool,

    /// Log to this file instead of stderr.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Parses arguments from an explicit list (first item is the binary name).
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Settings for the bundled simulator.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig { seed: self.seed }
    }

    /// Settings for view mapping.
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            shots: self.shots,
            cell_pitch: self.cell_pitch,
            ..ViewConfig::default()
        }
    }

    /// Whether counts are cached per state.
    pub fn counts_policy(&self) -> CountsPolicy {
        if self.cache_counts {
            CountsPolicy::CachePerSelector
        } else {
            CountsPolicy::Resample
        }
    }
}

fn parse_selector(raw: &str) -> Result<BellStateSelector> {
    if let Ok(ordinal) = raw.parse::<usize>() {
        return BellStateSelector::from_ordinal(ordinal);
    }
    BellStateSelector::ALL
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(raw))
        .ok_or_else(|| BellError::invalid(format!("unknown Bell state '{}'", raw)))
}
