//! Raw CSV reading for the batch upload.
//!
//! ## CSV Format
//!
//! | Column        | Type    | Notes                        |
//! |---------------|---------|------------------------------|
//! | `totalIncome` | decimal | e.g. `500000.0`              |
//! | `wht`         | decimal | must not exceed `totalIncome` |
//! | `donation`    | decimal | capped at 100,000            |
//!
//! The first line is a header and is never interpreted here; rows are
//! returned verbatim (trimmed) so the engine can report errors by row index.
//!
//! ```csv
//! totalIncome,wht,donation
//! 500000.0,0.0,0.0
//! 600000.0,40000.0,20000.0
//! ```

/// Errors that can occur while reading CSV bytes.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// Split `input` into rows of trimmed string fields, header included.
///
/// Row lengths may vary; short rows are left for the engine to reject.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] if the input is not valid UTF-8 or not
/// structurally readable as CSV.
pub fn load_rows(input: &[u8]) -> Result<Vec<Vec<String>>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    reader
        .records()
        .map(|record| {
            let record = record?;
            Ok(record.iter().map(str::to_string).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UPLOAD_CSV: &str = "\
totalIncome,wht,donation
500000.0,0.0,0.0
600000.0, 40000.0 ,20000.0
";

    #[test]
    fn keeps_header_and_trims_fields() {
        let rows = load_rows(UPLOAD_CSV.as_bytes()).unwrap();

        assert_eq!(
            rows,
            vec![
                vec!["totalIncome", "wht", "donation"],
                vec!["500000.0", "0.0", "0.0"],
                vec!["600000.0", "40000.0", "20000.0"],
            ]
        );
    }

    #[test]
    fn short_rows_are_passed_through() {
        let rows = load_rows(b"totalIncome,wht,donation\n500000.0,0.0\n").unwrap();

        assert_eq!(rows[1], vec!["500000.0", "0.0"]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(load_rows(b"").unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let result = load_rows(b"totalIncome,wht,donation\n\xff\xfe,0,0\n");

        assert!(matches!(result, Err(CsvLoadError::Parse(_))));
    }
}
