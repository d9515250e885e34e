//! The five operations: compile, dump, list, merge and capabilities.
//!
//! Every output file holds one implicit root node. Compiling writes each
//! record as a child of that root; merging copies the root children of
//! existing files under a new one.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use makepak_core::{Colors, Tag};
use makepak_format::{FormatError, PakFile, dump};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::CompileError;
use crate::config::CompileConfig;
use crate::registry::Registry;
use crate::session::{CompileSession, Sink};
use crate::sprite::ImageStore;
use crate::tabfile::{self, TabRecord, ValueSource};

/// Outcome of a compile run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Objects written.
    pub objects: usize,
    /// Records skipped with a warning.
    pub skipped: usize,
    /// Files completed.
    pub files: usize,
    /// Files aborted by an encoder error (separate mode only).
    pub failed: usize,
}

/// Outcome of a merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub files: usize,
    pub objects: usize,
    /// Inputs skipped for a version mismatch or a read error.
    pub skipped: usize,
}

/// One line of `list` output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub tag: Tag,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
}

/// Expand directories to the `*.dat` files directly inside them, sorted.
/// Files are kept as given.
pub fn collect_sources(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            sources.push(input.clone());
            continue;
        }
        let entries = match fs::read_dir(input) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("cannot read directory {}: {}", input.display(), err);
                continue;
            }
        };
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("dat"))
            })
            .collect();
        found.sort();
        sources.extend(found);
    }
    sources
}

/// Records of every readable source, in order. Unreadable sources are
/// skipped with a warning.
pub fn read_records(sources: &[PathBuf]) -> Vec<TabRecord> {
    let mut records = Vec::new();
    for source in sources {
        match tabfile::read(source) {
            Ok(found) => {
                info!("read {} records from {}", found.len(), source.display());
                records.extend(found);
            }
            Err(err) => warn!("cannot read {}: {}", source.display(), err),
        }
    }
    records
}

/// `<obj>.<name>.pak`, with the name reduced to `[A-Za-z0-9_-]`.
pub fn separate_file_name(obj: &str, name: &str) -> String {
    let clean: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.{}.pak", obj.trim().to_ascii_lowercase(), clean)
}

pub struct Compiler {
    config: CompileConfig,
    registry: Registry,
    images: ImageStore,
}

impl Compiler {
    pub fn new(config: CompileConfig) -> Self {
        Self::with_registry(config, Registry::standard())
    }

    pub fn with_registry(config: CompileConfig, registry: Registry) -> Self {
        let images = ImageStore::new(&config);
        Self {
            config,
            registry,
            images,
        }
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Compile every source under `inputs` to `dest`: one file, or a
    /// directory of per-object files in separate mode.
    pub fn compile(&mut self, inputs: &[PathBuf], dest: &Path) -> Result<CompileStats, CompileError> {
        let sources = collect_sources(inputs);
        let records = read_records(&sources);
        if self.config.separate {
            self.compile_separate(dest, &records)
        } else {
            self.compile_to_file(dest, &records)
        }
    }

    /// Write `records` as one file into `out`.
    pub fn compile_records(
        &mut self,
        out: &mut dyn Sink,
        records: &[TabRecord],
    ) -> Result<CompileStats, CompileError> {
        let mut stats = CompileStats::default();
        let mut session = CompileSession::new(out, &mut self.images)?;
        let mut root = session.open_node(Tag::ROOT, 0)?;
        for record in records {
            if self.registry.dispatch(&mut session, &mut root, record)? {
                stats.objects += 1;
            } else {
                stats.skipped += 1;
            }
        }
        root.commit_root(&mut session)?;
        session.finish()?;
        stats.files = 1;
        Ok(stats)
    }

    /// Write `records` to the file `dest`. A failed file is removed.
    pub fn compile_to_file(
        &mut self,
        dest: &Path,
        records: &[TabRecord],
    ) -> Result<CompileStats, CompileError> {
        let result = self.write_file(dest, records);
        if result.is_err() {
            let _ = fs::remove_file(dest);
        }
        result
    }

    fn write_file(&mut self, dest: &Path, records: &[TabRecord]) -> Result<CompileStats, CompileError> {
        let mut out = BufWriter::new(File::create(dest)?);
        let stats = self.compile_records(&mut out, records)?;
        info!("wrote {} objects to {}", stats.objects, dest.display());
        debug!("{} image sheets loaded", self.images.sheet_count());
        Ok(stats)
    }

    /// Write each record to its own file in `dest_dir`.
    ///
    /// An encoder error aborts only that object's file. An I/O error ends
    /// the run. A record whose file name was already written in this run
    /// is skipped and the earlier object keeps its file.
    pub fn compile_separate(
        &mut self,
        dest_dir: &Path,
        records: &[TabRecord],
    ) -> Result<CompileStats, CompileError> {
        fs::create_dir_all(dest_dir)?;
        let mut stats = CompileStats::default();
        let mut written: HashSet<String> = HashSet::new();
        for record in records {
            let obj = record.get("obj");
            let name = record.get("name");
            if self.registry.by_name(obj).is_none() {
                warn!(
                    "line {}: skipping '{}': unknown object type '{}'",
                    record.line(),
                    name,
                    obj
                );
                stats.skipped += 1;
                continue;
            }
            let file_name = separate_file_name(obj, name);
            if written.contains(&file_name) {
                warn!(
                    "line {}: skipping '{}': {} is already written by another object",
                    record.line(),
                    name,
                    file_name
                );
                stats.skipped += 1;
                continue;
            }
            let path = dest_dir.join(&file_name);
            match self.compile_to_file(&path, std::slice::from_ref(record)) {
                Ok(done) => {
                    stats.objects += done.objects;
                    stats.skipped += done.skipped;
                    stats.files += 1;
                    written.insert(file_name);
                }
                Err(err) if err.is_io() => return Err(err),
                Err(err) => {
                    error!("line {}: {}: {}", record.line(), path.display(), err);
                    stats.failed += 1;
                }
            }
        }
        Ok(stats)
    }

    /// Copy the objects of every compatible file in `inputs` into `dest`.
    ///
    /// Inputs from another compiler version or that cannot be read are
    /// skipped with a warning; merging fails only when none is left.
    pub fn merge(&mut self, inputs: &[PathBuf], dest: &Path) -> Result<MergeStats, CompileError> {
        let mut stats = MergeStats::default();
        let mut files = Vec::new();
        for input in inputs {
            match PakFile::from_path(input) {
                Ok(file) if file.header.is_current() => files.push(file),
                Ok(file) => {
                    warn!(
                        "{}: compiled by version {} ({}), this is {}; skipped",
                        input.display(),
                        file.header.version_code,
                        file.header.compiler,
                        makepak_format::COMPILER_VERSION_CODE
                    );
                    stats.skipped += 1;
                }
                Err(err) => {
                    warn!("{}: {}; skipped", input.display(), err);
                    stats.skipped += 1;
                }
            }
        }
        if files.is_empty() {
            return Err(CompileError::NothingToMerge);
        }

        let result = self.write_merged(&files, dest);
        if result.is_err() {
            let _ = fs::remove_file(dest);
        }
        let objects = result?;
        stats.files = files.len();
        stats.objects = objects;
        info!("merged {} objects from {} files into {}", objects, files.len(), dest.display());
        Ok(stats)
    }

    fn write_merged(&mut self, files: &[PakFile], dest: &Path) -> Result<usize, CompileError> {
        let mut out = BufWriter::new(File::create(dest)?);
        let mut session = CompileSession::new(&mut out, &mut self.images)?;
        let mut root = session.open_node(Tag::ROOT, 0)?;
        for file in files {
            for node in file.objects() {
                session.copy_subtree(&mut root, file.subtree_bytes(node))?;
            }
        }
        let objects = root.child_count() as usize;
        root.commit_root(&mut session)?;
        session.finish()?;
        Ok(objects)
    }
}

/// Type and name of every object in a compiled file.
///
/// The file is read leniently; structural problems are logged and the
/// well-formed objects are still listed.
pub fn list_file(registry: &Registry, path: &Path) -> Result<Vec<ListEntry>, FormatError> {
    let (file, problems) = PakFile::from_path_lossy(path)?;
    for problem in &problems {
        warn!("{}: {}", path.display(), problem);
    }
    let entries = file
        .objects()
        .iter()
        .map(|node| ListEntry {
            tag: node.tag(),
            type_name: registry.label(node.tag()),
            name: registry.node_name(node).unwrap_or_default(),
        })
        .collect();
    Ok(entries)
}

/// Human-readable node tree of a compiled file.
pub fn dump_file(path: &Path, colors: Colors) -> Result<String, FormatError> {
    let (file, problems) = PakFile::from_path_lossy(path)?;
    Ok(dump(&file, &problems, colors))
}
