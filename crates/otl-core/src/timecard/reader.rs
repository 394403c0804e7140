use super::types::TimecardRow;
use crate::Result;
use std::path::Path;

pub struct TimecardReader;

impl TimecardReader {
    /// Read and parse a timecard CSV from the given path
    pub fn from_file(path: &Path) -> Result<Vec<TimecardRow>> {
        tracing::debug!("Reading timecard CSV from: {}", path.display());

        let reader = Self::builder().from_path(path)?;
        let rows = Self::collect(reader)?;

        tracing::info!(
            "Parsed timecard CSV with {} data rows",
            rows.len()
        );

        Ok(rows)
    }

    /// Parse a timecard from a CSV string
    pub fn from_str(content: &str) -> Result<Vec<TimecardRow>> {
        let reader = Self::builder().from_reader(content.as_bytes());
        Self::collect(reader)
    }

    fn builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        // Headers and cells written as "Project, Task, ..." carry stray
        // whitespace; the site expects exact values
        builder.trim(csv::Trim::All);
        builder
    }

    fn collect<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<TimecardRow>> {
        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<TimecardRow>().enumerate() {
            let row = record?;
            for (field, value) in ["Project", "Task", "Type"]
                .iter()
                .zip(row.identifying_fields())
            {
                if row.has_time_entries() && value.is_empty() {
                    tracing::warn!(
                        "Row {} has time entries but an empty {} field; the site will likely reject it",
                        index,
                        field
                    );
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Project,Task,Type,Work_Location_Country,Work_Location_State_Province,Sat_Start,Sat_Stop,Sun_Start,Sun_Stop,Mon_Start,Mon_Stop,Tue_Start,Tue_Stop,Wed_Start,Wed_Stop,Thu_Start,Thu_Stop,Fri_Start,Fri_Stop";

    #[test]
    fn test_parses_single_row() {
        let csv = format!(
            "{}\nProjX,Task1,Type1,US,CA,08:00,12:00,,,,,,,,,,,,\n",
            HEADER
        );
        let rows = TimecardReader::from_str(&csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project, "ProjX");
        assert_eq!(rows[0].sat_start, "08:00");
        assert_eq!(rows[0].sat_stop, "12:00");
        assert_eq!(rows[0].sun_start, "");
        assert!(rows[0].has_time_entries());
    }

    #[test]
    fn test_trims_padded_cells_and_headers() {
        let padded_header = HEADER.replace(',', ", ");
        let csv = format!(
            "{}\n P100 , 1.1 ,Regular,US,CA,,,,,, 09:00 ,,,,,,,,\n",
            padded_header
        );
        let rows = TimecardReader::from_str(&csv).unwrap();
        assert_eq!(rows[0].project, "P100");
        assert_eq!(rows[0].task, "1.1");
        assert_eq!(rows[0].mon_stop, "09:00");
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "Project,Task\nP100,1.1\n";
        assert!(TimecardReader::from_str(csv).is_err());
    }

    #[test]
    fn test_empty_file_yields_no_rows() {
        let rows = TimecardReader::from_str(&format!("{}\n", HEADER)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timecard.csv");
        std::fs::write(
            &path,
            format!("{}\nP100,1.1,Regular,US,CA,,,,,,,,,,,,,,\n", HEADER),
        )
        .unwrap();

        let rows = TimecardReader::from_file(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].has_time_entries());
    }
}
