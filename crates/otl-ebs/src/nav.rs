use crate::constants::{self, Urls};
use crate::Result;
use otl_browser::{AnyOf, Condition, Locator, Session, UrlContains};

/// Clicks through the application menus to the timecard creation page.
/// No state beyond the sequence position; a click failing to locate its
/// target within the timeout is fatal.
pub struct Navigator<'a> {
    session: &'a Session,
    urls: &'a Urls,
}

impl<'a> Navigator<'a> {
    pub fn new(session: &'a Session, urls: &'a Urls) -> Self {
        Self { session, urls }
    }

    /// From the home page, follow the overtime-eligibility menu to the
    /// Recent Timecards page
    pub async fn to_recent_timecards(&self) -> Result<()> {
        for link in [
            constants::OVERTIME_ELIGIBLE_LINK,
            constants::RECENT_TIMECARDS_LINK,
        ] {
            tracing::info!("Clicking \"{}\"", link);
            let element = self.session.find(&Locator::link_text(link), None).await?;
            element.click().await?;
            self.wait_for_timecards_page().await?;
        }
        Ok(())
    }

    /// Click the create-timecard control on the Recent Timecards page
    pub async fn create_new_timecard(&self) -> Result<()> {
        tracing::info!("Creating a new timecard");
        let element = self
            .session
            .find(&Locator::id(constants::CREATE_TIMECARD_ID), None)
            .await?;
        element.click().await?;
        self.wait_for_timecards_page().await?;
        Ok(())
    }

    /// Timecard pages are served under either of two routes
    async fn wait_for_timecards_page(&self) -> Result<()> {
        let on_timecards = AnyOf::new(vec![
            Box::new(UrlContains::new(self.urls.timecards_marker.clone())) as Box<dyn Condition>,
            Box::new(UrlContains::new(self.urls.timecards_alt_marker.clone())),
        ]);
        self.session.wait_until(&on_timecards, None).await?;
        Ok(())
    }
}
