use std::path::Path;

/// Container format of an input file.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Windows bitmap, 8 bits per pixel.
    Bmp,
    /// Headerless, one byte per pixel, row-major, top row first.
    Raw,
}

impl ContainerKind {
    /// Classify by file extension (case-insensitive `bmp` / `raw`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("bmp") {
            Some(Self::Bmp)
        } else if ext.eq_ignore_ascii_case("raw") {
            Some(Self::Raw)
        } else {
            None
        }
    }

    /// Classify by content. RAW has no magic, so anything that does not start
    /// with `BM` is treated as RAW.
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(b"BM") {
            Self::Bmp
        } else {
            Self::Raw
        }
    }

    /// Extension first, content as the fallback.
    pub fn classify(path: &Path, data: &[u8]) -> Self {
        Self::from_path(path).unwrap_or_else(|| Self::sniff(data))
    }
}
