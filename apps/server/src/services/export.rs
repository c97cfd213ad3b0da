//! Spreadsheet export of places

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_xlsxwriter::Workbook;
use uuid::Uuid;

use crate::{db::PlaceStore, models::Place, slug::slugify, Error, Result};

const EXPORT_HEADER: [&str; 7] = [
    "public_id",
    "name",
    "street1",
    "city",
    "country",
    "latitude",
    "longitude",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(Error::Validation(format!(
                "unsupported export format '{other}', expected 'xlsx' or 'csv'"
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Csv => "text/csv",
        }
    }
}

/// A generated export ready to stream to the caller.
pub struct PlaceExport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ExportService {
    store: Arc<dyn PlaceStore>,
}

impl ExportService {
    pub fn new(store: Arc<dyn PlaceStore>) -> Self {
        Self { store }
    }

    /// Export all of the tenant's non-deleted places, unfiltered and
    /// unpaginated.
    pub async fn export_places(
        &self,
        company_id: Uuid,
        format: ExportFormat,
    ) -> Result<PlaceExport> {
        let places = self.store.list_all(company_id).await?;

        tracing::info!(%company_id, rows = places.len(), format = format.extension(), "exporting places");

        let bytes = match format {
            ExportFormat::Csv => write_csv(&places)?,
            ExportFormat::Xlsx => write_xlsx(&places)?,
        };

        Ok(PlaceExport {
            filename: export_filename(format, Utc::now()),
            content_type: format.content_type(),
            bytes,
        })
    }
}

/// `places-<date>-<time>` slugged, plus the format's extension. Slugging
/// deletes the colon from the time, so 14:05 renders as 1405.
pub fn export_filename(format: ExportFormat, at: DateTime<Utc>) -> String {
    let stamp = at.format("%Y-%m-%d-%H:%M");
    format!("{}.{}", slugify(&format!("places-{stamp}")), format.extension())
}

fn write_csv(places: &[Place]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| Error::Internal(format!("csv write failed: {e}")))?;

    for place in places {
        writer
            .write_record([
                place.public_id.as_str(),
                place.name.as_str(),
                place.street1.as_deref().unwrap_or(""),
                place.city.as_deref().unwrap_or(""),
                place.country.as_deref().unwrap_or(""),
                &place.latitude.to_string(),
                &place.longitude.to_string(),
            ])
            .map_err(|e| Error::Internal(format!("csv write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Internal(format!("csv write failed: {e}")))
}

fn write_xlsx(places: &[Place]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let xlsx_err = |e: rust_xlsxwriter::XlsxError| Error::Internal(format!("xlsx write failed: {e}"));

    for (col, title) in EXPORT_HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title).map_err(xlsx_err)?;
    }

    for (idx, place) in places.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &place.public_id).map_err(xlsx_err)?;
        worksheet.write_string(row, 1, &place.name).map_err(xlsx_err)?;
        worksheet
            .write_string(row, 2, place.street1.as_deref().unwrap_or(""))
            .map_err(xlsx_err)?;
        worksheet
            .write_string(row, 3, place.city.as_deref().unwrap_or(""))
            .map_err(xlsx_err)?;
        worksheet
            .write_string(row, 4, place.country.as_deref().unwrap_or(""))
            .map_err(xlsx_err)?;
        worksheet.write_number(row, 5, place.latitude).map_err(xlsx_err)?;
        worksheet.write_number(row, 6, place.longitude).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_place(name: &str) -> Place {
        Place {
            id: Uuid::new_v4(),
            public_id: Place::new_public_id(),
            company_id: Uuid::new_v4(),
            name: name.to_string(),
            street1: Some("5 Dock Rd".to_string()),
            city: None,
            country: Some("Singapore".to_string()),
            latitude: 1.29,
            longitude: 103.85,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn filename_is_date_stamped_and_slugged() {
        let at = Utc.with_ymd_and_hms(2026, 8, 23, 14, 5, 0).unwrap();
        assert_eq!(
            export_filename(ExportFormat::Csv, at),
            "places-2026-08-23-1405.csv"
        );
        assert_eq!(
            export_filename(ExportFormat::Xlsx, at),
            "places-2026-08-23-1405.xlsx"
        );
    }

    #[test]
    fn format_parsing_defaults_are_strict() {
        assert_eq!(ExportFormat::parse("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("xlsx").unwrap(), ExportFormat::Xlsx);
        assert!(ExportFormat::parse("pdf").is_err());
    }

    #[test]
    fn csv_output_has_header_and_one_row_per_place() {
        let places = vec![sample_place("Depot A"), sample_place("Depot B")];
        let bytes = write_csv(&places).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.trim_end().lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("public_id,name,street1"));
        assert!(lines[1].contains("Depot A"));
        assert!(lines[2].contains("Depot B"));
    }

    #[test]
    fn xlsx_output_is_a_zip_container() {
        let places = vec![sample_place("Depot A")];
        let bytes = write_xlsx(&places).unwrap();
        // XLSX is a ZIP archive; check the magic bytes.
        assert_eq!(&bytes[..2], b"PK");
    }
}
