use serde::Deserialize;

/// Identifying columns preceding the time slots: Project, Task, Type,
/// Work_Location_Country, Work_Location_State_Province
pub const NUM_IDENTIFYING_FIELDS: usize = 5;

/// Seven days of paired start/stop cells, Sat through Fri
pub const NUM_TIME_SLOTS: usize = 14;

/// One CSV record: a line item's identifying fields plus up to seven days
/// of start/stop time pairs. Immutable once read; blank cells mean "no
/// entry".
#[derive(Debug, Clone, Deserialize)]
pub struct TimecardRow {
    #[serde(rename = "Project")]
    pub project: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Type")]
    pub pay_type: String,
    #[serde(rename = "Work_Location_Country")]
    pub country: String,
    #[serde(rename = "Work_Location_State_Province")]
    pub state_province: String,
    #[serde(rename = "Sat_Start")]
    pub sat_start: String,
    #[serde(rename = "Sat_Stop")]
    pub sat_stop: String,
    #[serde(rename = "Sun_Start")]
    pub sun_start: String,
    #[serde(rename = "Sun_Stop")]
    pub sun_stop: String,
    #[serde(rename = "Mon_Start")]
    pub mon_start: String,
    #[serde(rename = "Mon_Stop")]
    pub mon_stop: String,
    #[serde(rename = "Tue_Start")]
    pub tue_start: String,
    #[serde(rename = "Tue_Stop")]
    pub tue_stop: String,
    #[serde(rename = "Wed_Start")]
    pub wed_start: String,
    #[serde(rename = "Wed_Stop")]
    pub wed_stop: String,
    #[serde(rename = "Thu_Start")]
    pub thu_start: String,
    #[serde(rename = "Thu_Stop")]
    pub thu_stop: String,
    #[serde(rename = "Fri_Start")]
    pub fri_start: String,
    #[serde(rename = "Fri_Stop")]
    pub fri_stop: String,
}

impl TimecardRow {
    /// The five identifying fields, in CSV column order
    pub fn identifying_fields(&self) -> [&str; NUM_IDENTIFYING_FIELDS] {
        [
            &self.project,
            &self.task,
            &self.pay_type,
            &self.country,
            &self.state_province,
        ]
    }

    /// The fourteen time-slot fields, in CSV column order (Sat start/stop
    /// through Fri start/stop)
    pub fn time_slots(&self) -> [&str; NUM_TIME_SLOTS] {
        [
            &self.sat_start,
            &self.sat_stop,
            &self.sun_start,
            &self.sun_stop,
            &self.mon_start,
            &self.mon_stop,
            &self.tue_start,
            &self.tue_stop,
            &self.wed_start,
            &self.wed_stop,
            &self.thu_start,
            &self.thu_stop,
            &self.fri_start,
            &self.fri_stop,
        ]
    }

    /// All nineteen cells in CSV column order
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = Vec::with_capacity(NUM_IDENTIFYING_FIELDS + NUM_TIME_SLOTS);
        cells.extend(self.identifying_fields());
        cells.extend(self.time_slots());
        cells
    }

    /// True if any start/stop cell is non-blank. A row without any is a
    /// "no work this line" row and is skipped entirely by the filler.
    pub fn has_time_entries(&self) -> bool {
        self.time_slots().iter().any(|cell| !cell.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_row() -> TimecardRow {
        TimecardRow {
            project: "P100".to_string(),
            task: "1.1".to_string(),
            pay_type: "Regular".to_string(),
            country: "US".to_string(),
            state_province: "CA".to_string(),
            sat_start: String::new(),
            sat_stop: String::new(),
            sun_start: String::new(),
            sun_stop: String::new(),
            mon_start: String::new(),
            mon_stop: String::new(),
            tue_start: String::new(),
            tue_stop: String::new(),
            wed_start: String::new(),
            wed_stop: String::new(),
            thu_start: String::new(),
            thu_stop: String::new(),
            fri_start: String::new(),
            fri_stop: String::new(),
        }
    }

    #[test]
    fn test_blank_times_has_no_entries() {
        assert!(!blank_row().has_time_entries());
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let mut row = blank_row();
        row.mon_start = "  ".to_string();
        assert!(!row.has_time_entries());
    }

    #[test]
    fn test_single_entry_is_detected() {
        let mut row = blank_row();
        row.fri_stop = "17:00".to_string();
        assert!(row.has_time_entries());
    }

    #[test]
    fn test_cell_order_matches_csv_columns() {
        let mut row = blank_row();
        row.sat_start = "08:00".to_string();
        let cells = row.cells();
        assert_eq!(cells.len(), 19);
        assert_eq!(cells[0], "P100");
        assert_eq!(cells[4], "CA");
        assert_eq!(cells[5], "08:00");
        assert_eq!(cells[18], "");
    }
}
