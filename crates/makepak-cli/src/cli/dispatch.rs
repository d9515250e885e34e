//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use makepak_compiler::CompileConfig;

use super::ColorChoice;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::list::ListArgs;
use crate::commands::merge::MergeArgs;

/// Number of `-v` flags given anywhere on the command line.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

pub struct CompileParams {
    pub output: PathBuf,
    pub sources: Vec<PathBuf>,
    pub separate: bool,
    pub cell_size: u32,
    pub no_zoom: bool,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            output: m.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
            sources: paths(m, "sources"),
            separate: m.get_flag("separate"),
            cell_size: m.get_one::<u32>("cell_size").copied().unwrap_or_default(),
            no_zoom: m.get_flag("no_zoom"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            output: p.output,
            sources: p.sources,
            config: CompileConfig {
                cell_size: p.cell_size,
                separate: p.separate,
                zoomable: !p.no_zoom,
            },
        }
    }
}

pub struct DumpParams {
    pub files: Vec<PathBuf>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: paths(m, "files"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            files: p.files,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ListParams {
    pub files: Vec<PathBuf>,
    pub json: bool,
}

impl ListParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: paths(m, "files"),
            json: m.get_flag("json"),
        }
    }
}

impl From<ListParams> for ListArgs {
    fn from(p: ListParams) -> Self {
        Self {
            files: p.files,
            json: p.json,
        }
    }
}

pub struct MergeParams {
    pub output: PathBuf,
    pub files: Vec<PathBuf>,
}

impl MergeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            output: m.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
            files: paths(m, "files"),
        }
    }
}

impl From<MergeParams> for MergeArgs {
    fn from(p: MergeParams) -> Self {
        Self {
            output: p.output,
            files: p.files,
        }
    }
}

pub struct CapabilitiesParams;

impl CapabilitiesParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

fn paths(m: &ArgMatches, id: &str) -> Vec<PathBuf> {
    m.get_many::<PathBuf>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
