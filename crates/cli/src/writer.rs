//! Turns recommended movie ids into titles and writes them out.
//!
//! Output format is one title per line, in recommendation order. Ids with no
//! known title are skipped with a warning.

use anyhow::{Context, Result};
use data_loader::{MovieId, MovieTitles, UserId};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// A recommended movie with its resolved title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitledMovie<'a> {
    pub movie_id: MovieId,
    pub title: &'a str,
}

/// JSON body for `--explain --json`: the list plus the neighbour it came from
#[derive(Debug, Serialize)]
pub struct ExplainedMovies<'a> {
    pub similar_user: UserId,
    pub movies: &'a [TitledMovie<'a>],
}

/// Resolve ids to titles, keeping order and dropping unknown ids
pub fn resolve_titles<'a>(
    movie_ids: &[MovieId],
    titles: &'a MovieTitles,
) -> Vec<TitledMovie<'a>> {
    movie_ids
        .iter()
        .filter_map(|&movie_id| match titles.title(movie_id) {
            Some(title) => Some(TitledMovie { movie_id, title }),
            None => {
                warn!(movie_id, "No title known for movie, skipping");
                None
            }
        })
        .collect()
}

/// Write one title per line; returns how many lines were written
pub fn write_titles<W: Write>(
    mut out: W,
    movies: &[TitledMovie<'_>],
) -> std::io::Result<usize> {
    for movie in movies {
        writeln!(out, "{}", movie.title)?;
    }
    out.flush()?;
    Ok(movies.len())
}

/// Create (or truncate) `path` and write the titles to it
pub fn write_titles_file(path: &Path, movies: &[TitledMovie<'_>]) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Could not create output file {}", path.display()))?;
    let written = write_titles(BufWriter::new(file), movies)
        .with_context(|| format!("Could not write to {}", path.display()))?;

    info!(path = %path.display(), "Wrote {} titles", written);
    Ok(written)
}
