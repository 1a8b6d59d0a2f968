pub mod repl;

use anyhow::anyhow;

/// Adapts any debuggable error into an owned `anyhow` error, so binary
/// crates can return `anyhow::Result` from `main`.
pub trait ResultExt<T> {
    fn staticalize(self) -> anyhow::Result<T>;
}
impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    fn staticalize(self) -> anyhow::Result<T> {
        self.map_err(|e| anyhow!("{e:?}"))
    }
}
