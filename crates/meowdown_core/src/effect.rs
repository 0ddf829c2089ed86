use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe the external tools and install whichever is missing.
    EnsureDependencies,
    /// Launch one extraction subprocess with a fully built argument list.
    RunDownload {
        index: usize,
        total: usize,
        args: Vec<String>,
        destination: PathBuf,
    },
    /// Stitch the downloaded audio tracks in `directory` into one file.
    MergeTracks {
        directory: PathBuf,
        extension: String,
    },
}
