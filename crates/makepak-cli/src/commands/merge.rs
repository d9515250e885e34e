use std::path::PathBuf;

use makepak_compiler::{CompileConfig, Compiler};
use tracing::info;

pub struct MergeArgs {
    pub output: PathBuf,
    pub files: Vec<PathBuf>,
}

pub fn run(args: MergeArgs) {
    let mut compiler = Compiler::new(CompileConfig::default());
    match compiler.merge(&args.files, &args.output) {
        Ok(stats) => info!(
            "{} objects from {} files, {} files skipped",
            stats.objects, stats.files, stats.skipped
        ),
        Err(e) => {
            eprintln!("error: {}: {}", args.output.display(), e);
            std::process::exit(1);
        }
    }
}
