//! Country table loading and lookup.
//!
//! The table is a CSV file with one row per country. [`load`] parses it once
//! and keeps it for the rest of the process; every later call hands back the
//! same `&'static Dataset` regardless of the path passed.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::game_engine::{error::DataLoadError, models::CountryRecord};

/// Header names the loader insists on, in file order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "country",
    "country_code",
    "HDI",
    "GII",
    "latitude",
    "longitude",
    "life expectancy",
    "mean years of schooling",
    "GNI per capita",
];

static DATASET: OnceLock<Dataset> = OnceLock::new();
static LOAD_GUARD: Mutex<()> = Mutex::new(());

/// Ordered, read-only collection of [`CountryRecord`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<CountryRecord>,
}

impl Dataset {
    /// Wrap already-built records. Country codes are normalised the same way
    /// the CSV loader does it.
    ///
    /// Country names must be unique, and HDI and GII must lie in `[0.0, 1.0]`.
    pub fn from_records(records: Vec<CountryRecord>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }
        let mut seen = HashSet::with_capacity(records.len());
        let mut checked = Vec::with_capacity(records.len());
        for mut r in records {
            check_index(&r, "HDI", r.hdi)?;
            check_index(&r, "GII", r.gii)?;
            if !seen.insert(r.country.clone()) {
                return Err(DataLoadError::DuplicateCountry(r.country));
            }
            r.country_code = r.country_code.trim().to_lowercase();
            checked.push(r);
        }
        Ok(Dataset { records: checked })
    }

    /// Parse a CSV table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(|e| malformed(&e))?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DataLoadError::MissingColumn(column));
            }
        }

        let mut records = Vec::new();
        for row in rdr.deserialize::<CountryRecord>() {
            records.push(row.map_err(|e| malformed(&e))?);
        }
        Self::from_records(records)
    }

    /// Open and parse a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(path = %path.display(), countries = dataset.len(), "loaded country dataset");
        Ok(dataset)
    }

    /// The row whose `country` equals `name` exactly.
    pub fn lookup(&self, name: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.country == name)
    }

    /// Pick one country uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CountryRecord> {
        self.records.choose(rng)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.country.as_str())
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// NaN fails the range test as well.
fn check_index(record: &CountryRecord, column: &'static str, value: f64) -> Result<(), DataLoadError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DataLoadError::OutOfRange {
            country: record.country.clone(),
            column,
            value,
        })
    }
}

fn malformed(err: &csv::Error) -> DataLoadError {
    DataLoadError::Malformed {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

/// Load the table from `path` on first use and share it process-wide.
///
/// Concurrent first callers serialise on a guard so the file is parsed once.
/// A failed load is not cached; the next call tries again.
pub fn load(path: impl AsRef<Path>) -> Result<&'static Dataset, DataLoadError> {
    load_once(&DATASET, &LOAD_GUARD, || Dataset::from_path(path))
}

/// Fill `cell` with `loader` unless it already holds a dataset. `guard`
/// makes sure at most one caller runs `loader` at a time.
fn load_once<'a, F>(
    cell: &'a OnceLock<Dataset>,
    guard: &Mutex<()>,
    loader: F,
) -> Result<&'a Dataset, DataLoadError>
where
    F: FnOnce() -> Result<Dataset, DataLoadError>,
{
    if let Some(dataset) = cell.get() {
        return Ok(dataset);
    }
    let _guard = guard.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(dataset) = cell.get() {
        debug!("dataset loaded by a concurrent caller");
        return Ok(dataset);
    }
    let dataset = loader()?;
    Ok(cell.get_or_init(|| dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    const HEADER: &str = "country,country_code,HDI,GII,latitude,longitude,life expectancy,mean years of schooling,GNI per capita";

    fn csv_with(rows: &[&str]) -> String {
        let mut s = String::from(HEADER);
        for r in rows {
            s.push('\n');
            s.push_str(r);
        }
        s
    }

    #[test]
    fn parses_rows_and_normalises_codes() {
        let text = csv_with(&[
            "Norway, NO ,0.966,0.012,60.47,8.47,83.4,13.1,69190",
            "Kenya,KE,0.601,0.533,-0.02,37.9,62.1,6.9,4474",
        ]);
        let ds = Dataset::from_reader(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        let norway = ds.lookup("Norway").unwrap();
        assert_eq!(norway.country_code, "no");
        assert!((norway.hdi - 0.966).abs() < 1e-9);
        assert!((norway.gni_per_capita - 69190.0).abs() < 1e-9);
        assert_eq!(ds.names().collect::<Vec<_>>(), ["Norway", "Kenya"]);
    }

    #[test]
    fn lookup_of_unknown_country_is_none() {
        let text = csv_with(&["Kenya,KE,0.601,0.533,-0.02,37.9,62.1,6.9,4474"]);
        let ds = Dataset::from_reader(text.as_bytes()).unwrap();
        assert!(ds.lookup("Atlantis").is_none());
        assert!(ds.lookup("kenya").is_none(), "lookup is exact-match");
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let text = "country,country_code,HDI,latitude,longitude,life expectancy,mean years of schooling,GNI per capita\n\
                    Kenya,KE,0.601,-0.02,37.9,62.1,6.9,4474";
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn("GII")), "got {err:?}");
    }

    #[test]
    fn non_numeric_cell_is_malformed() {
        let text = csv_with(&["Kenya,KE,high,0.533,-0.02,37.9,62.1,6.9,4474"]);
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        match err {
            DataLoadError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_is_empty() {
        let err = Dataset::from_reader(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::from_path(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", csv_with(&["Chile,CL,0.860,0.190,-35.6,-71.5,79.5,11.1,24431"])).unwrap();
        let ds = Dataset::from_path(file.path()).unwrap();
        assert_eq!(ds.lookup("Chile").unwrap().country_code, "cl");
    }

    #[test]
    fn choose_only_returns_loaded_countries() {
        let text = csv_with(&[
            "Norway,NO,0.966,0.012,60.47,8.47,83.4,13.1,69190",
            "Kenya,KE,0.601,0.533,-0.02,37.9,62.1,6.9,4474",
            "Chile,CL,0.860,0.190,-35.6,-71.5,79.5,11.1,24431",
        ]);
        let ds = Dataset::from_reader(text.as_bytes()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = ds.choose(&mut rng).unwrap();
            assert!(ds.lookup(&picked.country).is_some());
        }
    }

    #[test]
    fn nan_index_is_rejected() {
        let text = csv_with(&["Nowhere,NW,NaN,0.2,1.0,2.0,70.0,9.0,10000"]);
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        match err {
            DataLoadError::OutOfRange { country, column, value } => {
                assert_eq!(country, "Nowhere");
                assert_eq!(column, "HDI");
                assert!(value.is_nan());
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn index_outside_unit_range_is_rejected() {
        let high = csv_with(&["Nowhere,NW,7.5,0.2,1.0,2.0,70.0,9.0,10000"]);
        assert!(matches!(
            Dataset::from_reader(high.as_bytes()),
            Err(DataLoadError::OutOfRange { column: "HDI", .. })
        ));
        let low = csv_with(&["Nowhere,NW,0.5,-3,1.0,2.0,70.0,9.0,10000"]);
        assert!(matches!(
            Dataset::from_reader(low.as_bytes()),
            Err(DataLoadError::OutOfRange { column: "GII", .. })
        ));
    }

    #[test]
    fn repeated_country_is_rejected() {
        let text = csv_with(&[
            "Kenya,KE,0.601,0.533,-0.02,37.9,62.1,6.9,4474",
            "Kenya,KE,0.700,0.400,-0.02,37.9,62.1,6.9,4474",
        ]);
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateCountry(ref name) if name == "Kenya"), "got {err:?}");
    }

    #[test]
    fn concurrent_first_loads_parse_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let cell = OnceLock::new();
        let guard = Mutex::new(());
        let parses = AtomicUsize::new(0);
        let text = csv_with(&["Kenya,KE,0.601,0.533,-0.02,37.9,62.1,6.9,4474"]);

        let loaded: Vec<&Dataset> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        load_once(&cell, &guard, || {
                            parses.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(20));
                            Dataset::from_reader(text.as_bytes())
                        })
                        .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(parses.load(Ordering::SeqCst), 1);
        assert!(loaded.iter().all(|d| std::ptr::eq(*d, loaded[0])));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cell = OnceLock::new();
        let guard = Mutex::new(());
        assert!(load_once(&cell, &guard, || Err(DataLoadError::Empty)).is_err());
        let text = csv_with(&["Kenya,KE,0.601,0.533,-0.02,37.9,62.1,6.9,4474"]);
        let ds = load_once(&cell, &guard, || Dataset::from_reader(text.as_bytes())).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn cached_load_returns_same_instance() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/final_data.csv");
        let loaded: Vec<&'static Dataset> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| load(path).unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let later = load("ignored/after/first/load.csv").unwrap();
        assert!(loaded.iter().all(|d| std::ptr::eq(*d, later)));
        assert!(!later.is_empty());
    }
}
