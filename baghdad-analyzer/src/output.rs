use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AnalysisError;

/// A row type that can be written as CSV and dumped to the console.
pub trait Table {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Two decimal places, the precision of every reported number.
pub fn num(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn opt_num(value: Option<f64>) -> String {
    value.map(num).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct OutputDirs {
    tables: PathBuf,
    figures: PathBuf,
}

impl OutputDirs {
    /// Creates both directories if they are missing.
    pub fn create(
        tables: impl Into<PathBuf>,
        figures: impl Into<PathBuf>,
    ) -> Result<Self, AnalysisError> {
        let dirs = Self {
            tables: tables.into(),
            figures: figures.into(),
        };
        for dir in [&dirs.tables, &dirs.figures] {
            fs::create_dir_all(dir).map_err(|source| AnalysisError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(dirs)
    }

    pub fn table(&self, file_name: &str) -> PathBuf {
        self.tables.join(file_name)
    }

    pub fn figure(&self, file_name: &str) -> PathBuf {
        self.figures.join(file_name)
    }
}

/// Writes the header row followed by every row, even when `rows` is empty.
pub fn write_csv<T: Table>(path: &Path, rows: &[T]) -> Result<(), AnalysisError> {
    let csv_error = |source| AnalysisError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;
    writer.write_record(T::HEADERS).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row.cells()).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = rows.len(), "saved");
    Ok(())
}

pub fn section(title: &str) {
    println!("\n{}", title);
    println!("{}", "-".repeat(title.chars().count()));
}

/// Prints rows as left-aligned columns.
pub fn print_table<T: Table>(rows: &[T]) {
    println!("{}", render_table(rows));
}

pub fn render_table<T: Table>(rows: &[T]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(|row| row.cells()).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |row: Vec<&str>| {
        row.iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(T::HEADERS.to_vec())];
    lines.extend(
        cells
            .iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}
