use crate::formats::common::grid_to_election;
use crate::formats::{FormatError, Result};
use crate::model::Election;
use calamine::{open_workbook_auto, DataType, Reader};
use std::fs::File;
use std::path::Path;

/// Read a form response export saved as CSV.
///
/// The first row is the header. Rows may have differing lengths; missing cells
/// are unranked.
pub fn read_csv(path: &Path, skip_columns: usize) -> Result<Election> {
    let file = File::open(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    grid_to_election(rows, skip_columns, path)
}

/// Read the first sheet of a workbook export (xlsx, xls, ods).
pub fn read_workbook(path: &Path, skip_columns: usize) -> Result<Election> {
    let mut workbook = open_workbook_auto(path)?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FormatError::Empty(path.to_path_buf()))?;
    let sheet = workbook
        .worksheet_range(&first_sheet)
        .ok_or_else(|| FormatError::Empty(path.to_path_buf()))??;

    let rows = sheet.rows().map(row_cells);

    grid_to_election(rows, skip_columns, path)
}

/// A sheet row as text. Rows inside the used range that hold no cells at all
/// come back empty, like a blank line in a CSV export.
fn row_cells(row: &[DataType]) -> Vec<String> {
    if row.iter().all(|cell| matches!(cell, DataType::Empty)) {
        return Vec::new();
    }
    row.iter().map(cell_text).collect()
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        // Form timestamps; only the serial number is needed.
        DataType::DateTime(serial) => serial.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_form_export() {
        let file = write_csv(
            "Timestamp,\"Rank [Alice]\",\"Rank [Bob]\",\"Rank [Carol]\"\n\
             2024/03/01 9:00:00,1,3,2\n\
             2024/03/01 9:05:00,,1,\n\
             2024/03/01 9:07:00,1,,3\n",
        );
        let election = read_csv(file.path(), 1).unwrap();

        assert_eq!(election.candidates, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(election.ballots[0], vec!["Alice", "Carol", "Bob"]);
        assert_eq!(election.ballots[1], vec!["Bob"]);
        assert_eq!(election.ballots[2], vec!["Alice"]);
    }

    #[test]
    fn test_read_without_timestamp_column() {
        let file = write_csv("A,B\n2,1\n1\n");
        let election = read_csv(file.path(), 0).unwrap();

        assert_eq!(election.candidates, vec!["A", "B"]);
        assert_eq!(election.ballots, vec![vec!["B", "A"], vec!["A"]]);
    }

    #[test]
    fn test_response_without_ranks_counts() {
        let file = write_csv(
            "Timestamp,Rank [A],Rank [B],Rank [C]\n\
             t1,1,2,\n\
             ,,,\n\
             \n\
             t3,,,\n",
        );
        let election = read_csv(file.path(), 1).unwrap();

        assert_eq!(election.ballot_count(), 3);
        assert_eq!(election.ballots[0], vec!["A", "B"]);
        assert!(election.ballots[1].is_empty());
        assert!(election.ballots[2].is_empty());
    }

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Form Responses 1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

    fn text_cell(reference: &str, text: &str) -> String {
        format!(r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#, reference, text)
    }

    fn number_cell(reference: &str, value: f64) -> String {
        format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value)
    }

    fn write_workbook(rows: &[Vec<String>]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut zip = zip::ZipWriter::new(file.reopen().unwrap());
        let options = zip::write::FileOptions::default();

        let sheet_data: String = rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.is_empty())
            .map(|(idx, cells)| format!(r#"<row r="{}">{}</row>"#, idx + 1, cells.concat()))
            .collect();
        let sheet = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            sheet_data
        );

        for (name, body) in [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", sheet.as_str()),
        ] {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        file
    }

    #[test]
    fn test_read_workbook_export() {
        let file = write_workbook(&[
            vec![
                text_cell("A1", "Timestamp"),
                text_cell("B1", "Rank [A]"),
                text_cell("C1", "Rank [B]"),
                text_cell("D1", "Rank [C]"),
            ],
            vec![
                number_cell("A2", 45000.4),
                number_cell("B2", 1.0),
                number_cell("D2", 2.0),
            ],
            vec![number_cell("A3", 45000.5)],
            Vec::new(),
            vec![number_cell("A5", 45000.6), number_cell("C5", 1.0)],
        ]);
        let election = read_workbook(file.path(), 1).unwrap();

        assert_eq!(election.candidates, vec!["A", "B", "C"]);
        assert_eq!(election.ballot_count(), 3);
        assert_eq!(election.ballots[0], vec!["A", "C"]);
        assert!(election.ballots[1].is_empty());
        assert_eq!(election.ballots[2], vec!["B"]);
    }

    #[test]
    fn test_date_cells_keep_the_row() {
        let row = [DataType::DateTime(45000.4), DataType::Empty, DataType::Empty];
        let cells = row_cells(&row);
        assert_eq!(cells.len(), 3);
        assert!(!cells[0].is_empty());

        assert!(row_cells(&[DataType::Empty, DataType::Empty]).is_empty());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = read_csv(Path::new("/nonexistent/ballots.csv"), 1).unwrap_err();
        assert!(matches!(err, FormatError::Io { .. }));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&DataType::Float(2.0)), "2");
        assert_eq!(cell_text(&DataType::Int(3)), "3");
        assert_eq!(cell_text(&DataType::String("1st".to_string())), "1st");
        assert_eq!(cell_text(&DataType::Empty), "");
    }
}
