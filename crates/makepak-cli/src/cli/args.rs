//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Text sources: files or directories (positional, repeatable).
pub fn sources_arg() -> Arg {
    Arg::new("sources")
        .value_name("SOURCE")
        .num_args(1..)
        .default_value(".")
        .value_parser(value_parser!(PathBuf))
        .help("Source files or directories of *.dat files")
}

/// Compiled object files (positional, repeatable, required).
pub fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILE")
        .num_args(1..)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Compiled object files")
}

/// Destination (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DEST")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Output file, or output directory with --separate")
}

/// One file per object (--separate).
pub fn separate_arg() -> Arg {
    Arg::new("separate")
        .long("separate")
        .action(ArgAction::SetTrue)
        .help("Write one file per object into the output directory")
}

/// Cell edge length in source sheets (--cell-size).
pub fn cell_size_arg() -> Arg {
    Arg::new("cell_size")
        .long("cell-size")
        .value_name("PIXELS")
        .default_value("64")
        .value_parser(value_parser!(u32).range(1..))
        .help("Edge length of one image cell in source sheets")
}

/// Do not mark images as zoomable (--no-zoom).
pub fn no_zoom_arg() -> Arg {
    Arg::new("no_zoom")
        .long("no-zoom")
        .action(ArgAction::SetTrue)
        .help("Do not mark images as zoomable")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

/// Log verbosity (-v/--verbose), counted.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log progress (-v) or details (-vv); MAKEPAK_LOG overrides")
}
