use std::fs::{create_dir_all, write};
use std::io;
use std::path::Path;

/// Writes the payload as `outdir/filename` when a mirror directory is
/// configured, creating the directory (and parents) on first use and
/// overwriting any file already carrying that name. A `None` directory is a
/// no-op.
pub fn maybe_write_local(outdir: Option<&Path>, filename: &str, payload: &[u8]) -> io::Result<()> {
    let Some(outdir) = outdir else {
        return Ok(());
    };

    create_dir_all(outdir)?;
    write(outdir.join(filename), payload)
}
