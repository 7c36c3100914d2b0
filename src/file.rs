//! JSON file loading.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::from_reader;
use tracing::{debug, warn};

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = File::open(path)?;
    Ok(from_reader(BufReader::new(file))?)
}

pub trait FromJsonFile<D> {
    fn from_json_file(path: impl AsRef<Path>) -> Result<D, io::Error>;
}

impl<D: DeserializeOwned> FromJsonFile<D> for D {
    fn from_json_file(path: impl AsRef<Path>) -> Result<D, io::Error> {
        read_json(path)
    }
}

/// Reads a JSON array of records. A missing or malformed file yields an empty collection.
pub fn load_collection<T: DeserializeOwned>(path: impl AsRef<Path>) -> Vec<T> {
    let path = path.as_ref();
    match read_json::<Vec<T>>(path) {
        Ok(records) => {
            debug!("loaded {} records from {}", records.len(), path.display());
            records
        }
        Err(err) => {
            warn!("skipping {}: {err}", path.display());
            vec![]
        }
    }
}
