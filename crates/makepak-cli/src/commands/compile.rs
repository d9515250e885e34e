use std::path::PathBuf;

use makepak_compiler::{CompileConfig, Compiler};
use tracing::{info, warn};

pub struct CompileArgs {
    pub output: PathBuf,
    pub sources: Vec<PathBuf>,
    pub config: CompileConfig,
}

pub fn run(args: CompileArgs) {
    let mut compiler = Compiler::new(args.config);
    let stats = match compiler.compile(&args.sources, &args.output) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("error: {}: {}", args.output.display(), e);
            std::process::exit(1);
        }
    };

    if stats.objects == 0 && stats.failed == 0 {
        warn!("no objects compiled");
    }
    info!(
        "{} objects in {} files, {} records skipped",
        stats.objects, stats.files, stats.skipped
    );

    if stats.failed > 0 {
        eprintln!(
            "error: {} of {} objects failed",
            stats.failed,
            stats.failed + stats.files
        );
        std::process::exit(1);
    }
}
