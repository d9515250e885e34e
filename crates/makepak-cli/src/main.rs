mod cli;
mod commands;

use cli::{
    CapabilitiesParams, CompileParams, DumpParams, ListParams, MergeParams, build_cli, verbosity,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();
    init_logging(verbosity(&matches));

    match matches.subcommand() {
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("list", m)) => {
            let params = ListParams::from_matches(m);
            commands::list::run(params.into());
        }
        Some(("merge", m)) => {
            let params = MergeParams::from_matches(m);
            commands::merge::run(params.into());
        }
        Some(("capabilities", m)) => {
            let _params = CapabilitiesParams::from_matches(m);
            commands::capabilities::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Warnings and progress go to stderr. `MAKEPAK_LOG` takes precedence over
/// `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MAKEPAK_LOG").unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
