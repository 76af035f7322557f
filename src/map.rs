// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of textual map descriptions into a [GeoIndex].
//!
//! The format is line-based: a street name, a count of segment lines, then
//! that many `lat1 lon1 lat2 lon2` lines, repeated for every street. Every
//! segment is registered in both directions, since the described streets
//! are traversable both ways.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::{GeoCoord, GeoIndex, StreetSegment};

/// Error conditions which may occur while loading a map description.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line {0}: expected a segment count")]
    BadSegmentCount(usize),

    #[error("line {0}: expected \"lat1 lon1 lat2 lon2\"")]
    BadCoordinates(usize),

    #[error("unexpected end of map data after line {0}")]
    UnexpectedEof(usize),
}

/// Parses a map description from a reader into a [GeoIndex].
///
/// The provided stream is automatically wrapped in a buffered reader.
pub fn load_map_from_io<R: io::Read>(index: &mut GeoIndex, reader: R) -> Result<(), MapError> {
    let mut lines = io::BufReader::new(reader).lines();
    let mut line_no: usize = 0;
    let mut streets: usize = 0;
    let mut segments: usize = 0;

    while let Some(name) = next_line(&mut lines, &mut line_no)? {
        if name.is_empty() {
            continue;
        }

        let count_line =
            next_line(&mut lines, &mut line_no)?.ok_or(MapError::UnexpectedEof(line_no))?;
        let count: usize = count_line
            .parse()
            .map_err(|_| MapError::BadSegmentCount(line_no))?;

        for _ in 0..count {
            let segment_line =
                next_line(&mut lines, &mut line_no)?.ok_or(MapError::UnexpectedEof(line_no))?;
            let segment = parse_segment(&segment_line, &name)
                .ok_or(MapError::BadCoordinates(line_no))?;

            index.put(segment.end.clone(), segment.reversed());
            index.put(segment.start.clone(), segment);
            segments += 1;
        }
        streets += 1;
    }

    log::info!("loaded {} streets ({} segments)", streets, segments);
    Ok(())
}

/// Parses a map description from a file at the provided path into a [GeoIndex].
pub fn load_map_from_file<P: AsRef<Path>>(index: &mut GeoIndex, path: P) -> Result<(), MapError> {
    let f = File::open(path)?;
    load_map_from_io(index, f)
}

fn next_line<B: BufRead>(
    lines: &mut io::Lines<B>,
    line_no: &mut usize,
) -> Result<Option<String>, MapError> {
    match lines.next() {
        Some(line) => {
            *line_no += 1;
            Ok(Some(line?.trim().to_string()))
        }
        None => Ok(None),
    }
}

fn parse_segment(line: &str, street: &str) -> Option<StreetSegment> {
    let mut fields = line.split_whitespace();
    let lat1 = fields.next()?;
    let lon1 = fields.next()?;
    let lat2 = fields.next()?;
    let lon2 = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    Some(StreetSegment {
        start: GeoCoord::new(lat1, lon1)?,
        end: GeoCoord::new(lat2, lon2)?,
        name: street.to_string(),
    })
}
