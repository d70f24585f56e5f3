use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::LifeError;
use crate::grid::Grid;

/// Open `path` for writing, truncating it.
pub fn create_sink(path: &Path) -> Result<BufWriter<File>, LifeError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| LifeError::Output {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the interior cells, one line per row.
pub fn write_grid<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    write!(out, "{grid}")
}

/// Write the `Final Generation <n>:` header, the grid and a trailing blank line.
pub fn write_final_generation<W: Write>(out: &mut W, generation: usize, grid: &Grid) -> io::Result<()> {
    writeln!(out, "Final Generation {generation}:")?;
    write_grid(out, grid)?;
    writeln!(out)
}

/// Create `path` and fill it with `write`, mapping every failure to [`LifeError::Output`].
pub fn save<F>(path: &Path, write: F) -> Result<(), LifeError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut sink = create_sink(path)?;
    write(&mut sink)
        .and_then(|()| sink.flush())
        .map_err(|source| LifeError::Output {
            path: path.to_path_buf(),
            source,
        })
}
