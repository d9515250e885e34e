//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("makepak")
        .about("Compiler for text object records and PNG sheets")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(compile_command())
        .subcommand(dump_command())
        .subcommand(list_command())
        .subcommand(merge_command())
        .subcommand(capabilities_command())
}

/// Compile text sources into object files.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile text object records into an object file")
        .override_usage(
            "\
  makepak compile -o <DEST> [SOURCE]...
  makepak compile --separate -o <DIR> [SOURCE]...",
        )
        .after_help(
            r#"EXAMPLES:
  makepak compile -o vehicles.pak vehicles/         # every *.dat in a directory
  makepak compile -o coal.pak coal.dat              # one source file
  makepak compile --separate -o out/ .              # one file per object
  makepak compile --cell-size 128 -o big.pak big/   # 128px sheets"#,
        )
        .arg(output_arg())
        .arg(sources_arg())
        .arg(separate_arg())
        .arg(cell_size_arg())
        .arg(no_zoom_arg())
}

/// Show the node tree of object files.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the node tree of object files")
        .after_help(
            r#"EXAMPLES:
  makepak dump coal.pak                 # header and node tree
  makepak dump --color never *.pak      # several files, plain text"#,
        )
        .arg(files_arg())
        .arg(color_arg())
}

/// List the objects in object files.
pub fn list_command() -> Command {
    Command::new("list")
        .about("List the objects in object files")
        .after_help(
            r#"EXAMPLES:
  makepak list vehicles.pak             # type and name per object
  makepak list --json *.pak             # machine-readable"#,
        )
        .arg(files_arg())
        .arg(json_arg())
}

/// Merge object files into one.
pub fn merge_command() -> Command {
    Command::new("merge")
        .about("Copy the objects of several object files into one")
        .after_help(
            r#"EXAMPLES:
  makepak merge -o all.pak a.pak b.pak  # files from another version are skipped"#,
        )
        .arg(output_arg().help("Output file"))
        .arg(files_arg())
}

/// Print the object types this compiler can build.
pub fn capabilities_command() -> Command {
    Command::new("capabilities").about("List the object types this compiler can build")
}
