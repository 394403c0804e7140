use crate::constants;
use crate::{Error, Result};
use otl_browser::{ElementHandle, Session};
use otl_core::timecard::{TimecardRow, NUM_IDENTIFYING_FIELDS};
use otl_core::timeparse;
use std::time::Instant;

/// How one DOM input control within a grid row is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// One of the identifying columns (Project, Task, Type, Country,
    /// State/Province)
    Identifying,
    /// A start or stop time-entry control
    Time,
    /// The page-computed hours control; never written
    Hours,
}

/// Classify the input control at `dom_index` within a row. After the
/// identifying columns the controls repeat in groups of three:
/// {start, stop, hours}.
pub fn classify(dom_index: usize) -> CellKind {
    if dom_index < NUM_IDENTIFYING_FIELDS {
        CellKind::Identifying
    } else {
        match (dom_index - NUM_IDENTIFYING_FIELDS) % 3 {
            0 | 1 => CellKind::Time,
            _ => CellKind::Hours,
        }
    }
}

/// One planned write: which input control of the row gets which text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub input_index: usize,
    pub value: String,
}

/// Zip the CSV cells of a row against its input controls. Two cursors
/// advance under the classification rule: an hours control consumes no
/// CSV cell; blank and unparseable time cells consume their CSV cell but
/// produce no write.
pub fn plan_row(row: &TimecardRow, num_inputs: usize, row_index: usize) -> Vec<CellWrite> {
    let cells = row.cells();
    let mut writes = Vec::new();
    let mut csv_cursor = 0usize;

    for dom_index in 0..num_inputs {
        let kind = classify(dom_index);
        if kind == CellKind::Hours {
            continue;
        }
        let Some(cell) = cells.get(csv_cursor).copied() else {
            break;
        };
        csv_cursor += 1;

        match kind {
            CellKind::Identifying => {
                writes.push(CellWrite {
                    input_index: dom_index,
                    value: cell.to_string(),
                });
            }
            CellKind::Time => {
                if cell.trim().is_empty() {
                    continue;
                }
                match timeparse::canonicalize(cell) {
                    Some(value) => writes.push(CellWrite {
                        input_index: dom_index,
                        value,
                    }),
                    None => {
                        tracing::warn!(
                            "Skipping row {} column {}: \"{}\" matches none of the accepted time formats {:?}",
                            row_index,
                            csv_cursor - 1,
                            cell,
                            timeparse::ACCEPTED_FORMATS
                        );
                    }
                }
            }
            CellKind::Hours => unreachable!(),
        }
    }

    writes
}

/// Writes the CSV reference data into the expanding timecard grid, row by
/// row, column by column, adding grid rows on demand.
pub struct TimecardFiller<'a> {
    session: &'a Session,
}

impl<'a> TimecardFiller<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Fill every CSV row into the grid in order. `on_row_done` is called
    /// with each finished (or skipped) row index, for progress display.
    pub async fn fill(
        &self,
        rows: &[TimecardRow],
        mut on_row_done: impl FnMut(usize),
    ) -> Result<()> {
        for (row_index, row) in rows.iter().enumerate() {
            if !row.has_time_entries() {
                tracing::info!("Row {} has no time entries, skipping", row_index);
                on_row_done(row_index);
                continue;
            }
            self.fill_row(row_index, row).await?;
            on_row_done(row_index);
        }
        tracing::info!("Finished filling {} timecard rows", rows.len());
        Ok(())
    }

    async fn fill_row(&self, row_index: usize, row: &TimecardRow) -> Result<()> {
        tracing::info!("Filling row {} (project \"{}\")", row_index, row.project);

        let mut inputs = self.row_inputs(row_index).await;
        if inputs.is_empty() {
            self.add_row(row_index).await?;
            inputs = self.row_inputs(row_index).await;
        }
        if inputs.is_empty() {
            return Err(Error::Browser(otl_browser::Error::WaitTimeout {
                what: format!("inputs of grid row {} after adding it", row_index),
                timeout: self.session.default_wait(),
            }));
        }

        for write in plan_row(row, inputs.len(), row_index) {
            tracing::debug!(
                "Row {} input {} <- \"{}\"",
                row_index,
                write.input_index,
                write.value
            );
            let element = &inputs[write.input_index];
            // Typing the Project field without clicking away leaves the
            // page-side validation unrun and the Task field misbehaving
            let click_away = if write.input_index == 0 {
                inputs.get(1)
            } else {
                None
            };
            self.write_verified(element, &write.value, click_away).await?;
        }
        Ok(())
    }

    async fn row_inputs(&self, row_index: usize) -> Vec<ElementHandle> {
        self.session.find_all(&constants::row_inputs(row_index)).await
    }

    /// Clear, type, re-read; retry until the control reflects the value
    /// or the default wait elapses. The page's JavaScript drops keystrokes
    /// now and then, so a fire-and-forget write is not enough.
    async fn write_verified(
        &self,
        element: &ElementHandle,
        value: &str,
        click_away: Option<&ElementHandle>,
    ) -> Result<()> {
        let timeout = self.session.default_wait();
        let deadline = Instant::now() + timeout;
        loop {
            element.clear().await?;
            element.type_text(value).await?;
            if let Some(neighbor) = click_away {
                neighbor.click().await?;
                tokio::time::sleep(constants::AFTER_PROJECT_FIELD).await;
            }
            if element.value().await? == value {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::Browser(otl_browser::Error::WaitTimeout {
                    what: format!("input to reflect \"{}\"", value),
                    timeout,
                }));
            }
            tokio::time::sleep(constants::WAIT_FOR_DATA_ENTRY).await;
        }
    }

    /// Click "Add Another Row" and poll until the target row's inputs
    /// materialize. A known failure mode is the site rejecting the
    /// previous row's Task/Type combination instead of adding a row; that
    /// surfaces as an error banner and is not retryable by waiting.
    async fn add_row(&self, row_index: usize) -> Result<()> {
        tracing::info!("Adding a grid row for CSV row {}", row_index);
        tokio::time::sleep(constants::BEFORE_ADDING_ROW).await;

        let button = self.session.find(&constants::add_row_button(), None).await?;
        button.click().await?;
        tokio::time::sleep(constants::AFTER_ADDING_ROW).await;

        let timeout = self.session.default_wait();
        let started = Instant::now();
        let mut reclicked = false;
        loop {
            if !self.row_inputs(row_index).await.is_empty() {
                tracing::debug!("Grid row {} appeared", row_index);
                return Ok(());
            }
            if self.subtask_rejected().await {
                return Err(Error::SubtaskNotFound { row: row_index });
            }
            // One more click halfway through, in case the first one was
            // swallowed by a mid-render page
            if !reclicked && started.elapsed() >= timeout / 2 {
                tracing::warn!(
                    "Grid row {} still absent, clicking the add control again",
                    row_index
                );
                let button = self.session.find(&constants::add_row_button(), None).await?;
                button.click().await?;
                reclicked = true;
            }
            if started.elapsed() >= timeout {
                return Err(Error::Browser(otl_browser::Error::WaitTimeout {
                    what: format!("grid row {} to appear after clicking Add Another Row", row_index),
                    timeout,
                }));
            }
            tokio::time::sleep(otl_browser::POLL_INTERVAL).await;
        }
    }

    /// The rejected-subtask signature: error banner, "Task" link, and the
    /// "Select a valid value" message all present at once
    async fn subtask_rejected(&self) -> bool {
        for locator in [
            constants::error_banner(),
            constants::task_link(),
            constants::valid_value_message(),
        ] {
            if self.session.find_all(&locator).await.is_empty() {
                return false;
            }
        }
        true
    }
}
