//! CSV loading for the places and links tables.
//!
//! Both tables are header-less, comma separated files:
//!
//! - places: `name,reference,latitude,longitude`
//! - links: `start,end,mode`
//!
//! Rows that do not parse are skipped and counted rather than failing the
//! load. Only a file that cannot be opened, or an I/O failure while reading,
//! is an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{LinkRecord, Network, NodeRef, PlaceRecord};

/// Load both tables from disk and build the network.
///
/// Both files are opened before either is parsed so a missing links file
/// never produces a partially built network.
pub fn load_network(places_path: &Path, links_path: &Path) -> Result<Network> {
    let places_file = open_input(places_path)?;
    let links_file = open_input(links_path)?;

    let places = read_places(places_file)?;
    let links = read_links(links_file)?;
    debug!(
        places = places.len(),
        links = links.len(),
        places_path = %places_path.display(),
        links_path = %links_path.display(),
        "loaded network tables"
    );

    Ok(Network::build(places, links))
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Read place records from any reader.
pub fn read_places<R: Read>(reader: R) -> Result<Vec<PlaceRecord>> {
    read_rows(reader, "places", parse_place)
}

/// Read link records from any reader.
pub fn read_links<R: Read>(reader: R) -> Result<Vec<LinkRecord>> {
    read_rows(reader, "links", parse_link)
}

fn read_rows<R, T, F>(reader: R, table: &str, parse: F) -> Result<Vec<T>>
where
    R: Read,
    F: Fn(&StringRecord) -> Option<T>,
{
    let mut rows = Vec::new();
    let mut skipped_rows = 0usize;

    for result in csv_reader(reader).records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(Error::Csv(err)),
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }
        match parse(&record) {
            Some(row) => rows.push(row),
            None => skipped_rows += 1,
        }
    }

    if skipped_rows > 0 {
        debug!(table, skipped_rows, "skipped malformed rows");
    }

    Ok(rows)
}

fn parse_place(record: &StringRecord) -> Option<PlaceRecord> {
    if record.len() < 4 {
        return None;
    }
    Some(PlaceRecord {
        name: record.get(0)?.to_string(),
        reference: record.get(1)?.parse::<NodeRef>().ok()?,
        latitude: record.get(2)?.parse::<f64>().ok()?,
        longitude: record.get(3)?.parse::<f64>().ok()?,
    })
}

fn parse_link(record: &StringRecord) -> Option<LinkRecord> {
    if record.len() < 3 {
        return None;
    }
    Some(LinkRecord {
        start: record.get(0)?.parse::<NodeRef>().ok()?,
        end: record.get(1)?.parse::<NodeRef>().ok()?,
        mode: record.get(2)?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn places_parse_in_file_order() {
        let csv = "Hull Station,100,53.744,-0.345\nBeverley Minster,7,53.839,-0.425\n";
        let places = read_places(Cursor::new(csv)).expect("places parse");
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Hull Station");
        assert_eq!(places[0].reference, 100);
        assert_eq!(places[1].reference, 7);
        assert!((places[1].longitude + 0.425).abs() < 1e-12);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = "Good,1,53.0,-0.3\nBad,x,53.0,-0.3\nShort,2\n\nAlso Good,3,53.1,-0.2\n";
        let places = read_places(Cursor::new(csv)).expect("places parse");
        let refs: Vec<_> = places.iter().map(|p| p.reference).collect();
        assert_eq!(refs, vec![1, 3]);
    }

    #[test]
    fn links_keep_mode_text() {
        let csv = "1,2,Car\n2,3,Tram\n4,five,Bus\n";
        let links = read_links(Cursor::new(csv)).expect("links parse");
        assert_eq!(
            links,
            vec![
                LinkRecord {
                    start: 1,
                    end: 2,
                    mode: "Car".to_string()
                },
                LinkRecord {
                    start: 2,
                    end: 3,
                    mode: "Tram".to_string()
                },
            ]
        );
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let places = dir.path().join("Places.csv");
        std::fs::write(&places, "A,1,53.0,-0.3\n").expect("write places");
        let links = dir.path().join("missing.csv");

        let err = load_network(&places, &links).expect_err("links file is missing");
        match err {
            Error::InputUnavailable { path, .. } => assert_eq!(path, links),
            other => panic!("unexpected error: {other}"),
        }
    }
}
