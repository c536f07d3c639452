use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, OutcomeClass, REQUIRED_COLUMNS};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("opening CSV {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("reading CSV headers")]
    Headers(#[source] csv::Error),
    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("CSV line {line}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("CSV line {line}: payload {value} is not a non-negative number")]
    InvalidPayload { line: u64, value: f64 },
    #[error("CSV line {line}: class {value} is neither 0 nor 1")]
    InvalidClass { line: u64, value: f64 },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the launch dataset from a CSV file.
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let reader = csv_builder().from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_records(reader)?;

    match dataset.payload_bounds() {
        Some((min, max)) => log::info!(
            "Loaded {} launches from {} (sites {:?}, payload {min}..={max} kg)",
            dataset.len(),
            path.display(),
            dataset.sites()
        ),
        None => log::warn!("{} contains no launches", path.display()),
    }
    Ok(dataset)
}

/// Load the launch dataset from any reader yielding CSV text.
pub fn load_reader<R: Read>(rdr: R) -> Result<LaunchDataset, LoadError> {
    read_records(csv_builder().from_reader(rdr))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// One CSV row as serde sees it. Columns not named here (the unnamed
/// index, `Flight Number`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    // Dataframe exports sometimes write `1.0` for integer columns.
    #[serde(rename = "class")]
    class: f64,
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All);
    builder
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<LaunchDataset, LoadError> {
    let headers = reader.headers().map_err(LoadError::Headers)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    // Errors report the 1-based file line, header included.
    let mut records = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        let next_line = reader.position().line();
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(source) => {
                let line = source.position().map_or(next_line, |p| p.line());
                return Err(LoadError::Row { line, source });
            }
        }
        let line = record.position().map_or(next_line, |p| p.line());
        let raw: RawLaunchRow = record
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Row { line, source })?;
        records.push(into_record(raw, line)?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn into_record(raw: RawLaunchRow, line: u64) -> Result<LaunchRecord, LoadError> {
    if !raw.payload_mass_kg.is_finite() || raw.payload_mass_kg < 0.0 {
        return Err(LoadError::InvalidPayload {
            line,
            value: raw.payload_mass_kg,
        });
    }

    let outcome_class = if raw.class.fract() == 0.0 {
        OutcomeClass::from_code(raw.class as i64)
    } else {
        None
    };
    let outcome_class = outcome_class.ok_or(LoadError::InvalidClass {
        line,
        value: raw.class,
    })?;

    Ok(LaunchRecord {
        launch_site: raw.launch_site,
        payload_mass_kg: raw.payload_mass_kg,
        booster_version_category: raw.booster_version_category,
        booster_version: raw.booster_version,
        outcome_class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::SAMPLE_CSV;

    #[test]
    fn loads_fixture_and_ignores_extra_columns() {
        let ds = load_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 12);

        let first = &ds.records()[0];
        assert_eq!(first.launch_site, "CCAFS LC-40");
        assert_eq!(first.payload_mass_kg, 0.0);
        assert_eq!(first.booster_version, "F9 v1.0  B0003");
        assert_eq!(first.booster_version_category, "v1.0");
        assert_eq!(first.outcome_class, OutcomeClass::Failure);
    }

    #[test]
    fn accepts_float_encoded_class() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,Booster Version,class\n\
                   KSC LC-39A,2490,FT,F9 FT B1031.1,1.0\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].outcome_class, OutcomeClass::Success);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version,class\n\
                   KSC LC-39A,2490,F9 FT B1031.1,1\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Booster Version Category")));
    }

    #[test]
    fn unparseable_payload_reports_file_line() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,Booster Version,class\n\
                   KSC LC-39A,2490,FT,F9 FT B1031.1,1\n\
                   KSC LC-39A,heavy,FT,F9 FT B1032.1,1\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        // Header is line 1, so the second record sits on line 3.
        assert!(matches!(err, LoadError::Row { line: 3, .. }), "{err}");
        assert!(err.to_string().starts_with("CSV line 3"), "{err}");
    }

    #[test]
    fn rejects_negative_payload_and_bad_class() {
        let negative = "Launch Site,Payload Mass (kg),Booster Version Category,Booster Version,class\n\
                        KSC LC-39A,-5,FT,F9 FT B1031.1,1\n";
        assert!(matches!(
            load_reader(negative.as_bytes()).unwrap_err(),
            LoadError::InvalidPayload { line: 2, .. }
        ));

        let bad_class = "Launch Site,Payload Mass (kg),Booster Version Category,Booster Version,class\n\
                         KSC LC-39A,500,FT,F9 FT B1031.1,2\n";
        assert!(matches!(
            load_reader(bad_class.as_bytes()).unwrap_err(),
            LoadError::InvalidClass { line: 2, .. }
        ));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
