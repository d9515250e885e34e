use std::fmt::Write as _;
use std::path::PathBuf;

use makepak_compiler::dump_file;
use makepak_core::Colors;
use tracing::warn;

pub struct DumpArgs {
    pub files: Vec<PathBuf>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    print!("{}", render_dumps(&args.files, Colors::new(args.color)));
}

/// Node trees of every readable file. With several files, each tree is
/// headed by the file path. Files that cannot be read are skipped with a
/// warning.
pub fn render_dumps(files: &[PathBuf], colors: Colors) -> String {
    let several = files.len() > 1;
    let mut out = String::new();
    for path in files {
        let text = match dump_file(path, colors) {
            Ok(text) => text,
            Err(e) => {
                warn!("{}: {}; skipped", path.display(), e);
                continue;
            }
        };
        if several {
            if !out.is_empty() {
                out.push('\n');
            }
            writeln!(out, "{}{}{}", colors.dim, path.display(), colors.reset).unwrap();
        }
        out.push_str(&text);
    }
    out
}
