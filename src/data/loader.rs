use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::filter::drop_missing;
use super::model::{ProbeList, ProbeRecord, Quantity};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load all probes stored in a file.
///
/// Records without a depth are dropped, the rest are grouped per probe number
/// and sorted by depth.
pub fn load_file(path: &Path) -> Result<ProbeList> {
    let records = read_records(path)?;
    let n_records = records.len();
    let probes = ProbeList::from_records(records);

    log::info!(
        "Imported {n_records} measurements of {} probes from {}",
        probes.len(),
        path.display()
    );
    Ok(probes)
}

/// Read the raw probe records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "sondeernummer": "...", "diepte": 1.0, "qc": 2.1, "fs": 14.0 }, ...]`
/// * `.csv`     – header `sondeernummer,diepte,qc,fs`; empty cells are null
/// * `.parquet` – scalar columns with the same names
pub fn read_records(path: &Path) -> Result<Vec<ProbeRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "parquet" | "pq" => read_parquet(path),
        "json" => read_json(path),
        "csv" => read_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!("Read {} records from {}", records.len(), path.display());
    Ok(drop_missing(records, Quantity::Depth))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (a records-oriented DOV export):
///
/// ```json
/// [
///   { "sondeernummer": "GEO-97/127-S1", "diepte": 0.6, "qc": 9.12, "fs": 54.7 },
///   { "sondeernummer": "GEO-97/127-S1", "diepte": 0.61, "qc": 9.3, "fs": null },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<Vec<ProbeRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON probe records")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Vec<ProbeRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    reader
        .deserialize::<ProbeRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing probe records.
///
/// Expected schema:
/// - `sondeernummer`: Utf8, LargeUtf8 or an integer column
/// - `diepte`, `qc`, `fs`: nullable Float64, Float32, Int64 or Int32
fn read_parquet(path: &Path) -> Result<Vec<ProbeRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let number_col = column("sondeernummer")?;
        let depth_col = column(Quantity::Depth.field_name())?;
        let qc_col = column(Quantity::Qc.field_name())?;
        let fs_col = column(Quantity::Fs.field_name())?;

        for row in 0..batch.num_rows() {
            let probe_number = extract_string(number_col, row)
                .with_context(|| format!("Row {row}: failed to read 'sondeernummer'"))?;
            let depth = extract_optional_f64(depth_col, row)
                .with_context(|| format!("Row {row}: failed to read 'diepte'"))?;
            let qc = extract_optional_f64(qc_col, row)
                .with_context(|| format!("Row {row}: failed to read 'qc'"))?;
            let fs = extract_optional_f64(fs_col, row)
                .with_context(|| format!("Row {row}: failed to read 'fs'"))?;

            records.push(ProbeRecord {
                probe_number,
                depth,
                qc,
                fs,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Extract a nullable numeric cell as `f64`.
fn extract_optional_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Extract the probe number, which may be stored as text or as an integer.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null probe number");
    }
    let value = match col.data_type() {
        DataType::Utf8 => downcast::<StringArray>(col)?.value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row).to_string(),
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row).to_string(),
        other => bail!("Expected a string column, got {other:?}"),
    };
    Ok(value)
}

fn downcast<T: Array + 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type {:?}", col.data_type()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn csv_empty_cells_are_null() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        writeln!(file, "sondeernummer,diepte,qc,fs")?;
        writeln!(file, "S1,1.02,,12.5")?;
        writeln!(file, "S1,,3.0,1.0")?;
        writeln!(file, "S1,1.0,2.5,")?;
        file.flush()?;

        let records = read_records(file.path())?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].qc, None);
        assert_eq!(records[0].fs, Some(12.5));
        assert_eq!(records[1].fs, None);
        Ok(())
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_records(Path::new("probes.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
