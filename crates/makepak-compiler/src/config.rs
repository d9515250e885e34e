/// Default edge length of one image cell in a source sheet, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 64;

/// Settings for one compile run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileConfig {
    /// Edge length of one image cell in source sheets.
    pub cell_size: u32,
    /// Write one file per object instead of one file for all.
    pub separate: bool,
    /// Mark images as zoomable.
    pub zoomable: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            separate: false,
            zoomable: true,
        }
    }
}
