//! Parser for the CSV data files.
//!
//! This module handles the two inputs of a run:
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating[,timestamp]
//!
//! Both files start with a header row. Titles containing commas are quoted
//! (`11,"American President, The (1995)",Comedy|Drama|Romance`), which the
//! `csv` crate handles for us.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Marker MovieLens uses for movies without any genre
const NO_GENRES: &str = "(no genres listed)";

#[derive(Debug, Deserialize)]
struct MovieRow {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    #[serde(default)]
    genres: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "userId")]
    user_id: UserId,
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f32,
    // Present in MovieLens exports but unused by the recommender
    #[serde(default)]
    #[allow(dead_code)]
    timestamp: Option<i64>,
}

/// Open a data file, turning "no such file" into `FileNotFound`
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Convert a csv error for one row into our error type.
///
/// `row` is the zero-based record index; the header is line 1.
fn row_error(file: &str, row: usize, err: csv::Error) -> DataLoadError {
    let line = err
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(row + 2);

    match err.kind() {
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. } => {
            DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: err.to_string(),
            }
        }
        _ => DataLoadError::Csv {
            file: file.to_string(),
            source: err,
        },
    }
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input)
}

/// Parse the movies.csv file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    read_movies(open(path)?, &file_label(path))
}

/// Parse movies from any reader; `file` is only used in error messages
pub fn read_movies<R: Read>(input: R, file: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (row, result) in reader(input).deserialize::<MovieRow>().enumerate() {
        let record = result.map_err(|e| row_error(file, row, e))?;
        let title = record.title.trim().to_string();

        movies.push(Movie {
            id: record.movie_id,
            year: extract_year_from_title(&title),
            genres: parse_genres(record.genres.as_deref().unwrap_or("")),
            title,
        });
    }

    Ok(movies)
}

/// Parse the ratings.csv file
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingTriple>> {
    read_ratings(open(path)?, &file_label(path))
}

/// Parse ratings from any reader, keeping file row order
pub fn read_ratings<R: Read>(input: R, file: &str) -> Result<Vec<RatingTriple>> {
    let mut ratings = Vec::new();

    for (row, result) in reader(input).deserialize::<RatingRow>().enumerate() {
        let record = result.map_err(|e| row_error(file, row, e))?;
        ratings.push(RatingTriple {
            user_id: record.user_id,
            movie_id: record.movie_id,
            value: record.rating,
        });
    }

    Ok(ratings)
}

/// Extract year from movie title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end {
        if let Ok(year) = title[start + 1..end].trim().parse::<u16>() {
            return Some(year);
        }
    }
    None
}

/// Split pipe-separated genres
///
/// Example: "Action|Adventure|Sci-Fi" -> ["Action", "Adventure", "Sci-Fi"]
fn parse_genres(s: &str) -> Vec<String> {
    if s.trim() == NO_GENRES {
        return Vec::new();
    }
    s.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
