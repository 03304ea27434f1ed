use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{COLUMN_NAMES, Dataset, Reading};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a dataset to a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – one Float64 column per field
/// * `.json`    – `[{ "latitude": .., "longitude": .., "PM2.5": .., ... }, ...]`
/// * `.csv`     – header row followed by one line per reading
pub fn export_file(path: &Path, dataset: &Dataset) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let written = match ext.as_str() {
        "parquet" | "pq" => write_parquet(path, dataset),
        "json" => write_json(path, dataset),
        "csv" => write_csv(path, dataset),
        other => bail!("Unsupported file extension: .{other}"),
    };
    written.with_context(|| format!("exporting {} readings to {}", dataset.len(), path.display()))?;

    log::info!("Exported {} readings to {}", dataset.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV / JSON
// ---------------------------------------------------------------------------

fn write_csv(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    // Serialising `Reading` records writes the header from the serde names.
    if dataset.is_empty() {
        writer.write_record(COLUMN_NAMES)?;
    }
    for reading in dataset {
        writer.serialize(reading)?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_json(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), dataset.readings())
        .context("writing JSON")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Arrow / Parquet
// ---------------------------------------------------------------------------

/// Arrow schema matching [`COLUMN_NAMES`].
pub fn schema() -> Arc<Schema> {
    Arc::new(Schema::new(
        COLUMN_NAMES
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ))
}

/// Convert the dataset into a single columnar batch.
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let column = |f: fn(&Reading) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(dataset.iter().map(f)))
    };
    let columns = vec![
        column(|r| r.latitude),
        column(|r| r.longitude),
        column(|r| r.pm25),
        column(|r| r.pm10),
        column(|r| r.co),
    ];
    RecordBatch::try_new(schema(), columns).context("building record batch")
}

/// Render the first `limit` rows as an ASCII table.
pub fn preview(dataset: &Dataset, limit: usize) -> Result<String> {
    let head = dataset.select(&(0..limit.min(dataset.len())).collect::<Vec<_>>());
    let batch = to_record_batch(&head)?;
    let table = arrow::util::pretty::pretty_format_batches(&[batch])?;
    Ok(table.to_string())
}

fn write_parquet(path: &Path, dataset: &Dataset) -> Result<()> {
    let batch = to_record_batch(dataset)?;
    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
