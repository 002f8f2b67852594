//! UI-facing state controller.
//!
//! Every submitted query takes a sequence token. When a pipeline finishes, its
//! result is applied only if no newer query was submitted in the meantime, so the
//! latest submission always wins regardless of which response arrives last.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    model::{Query, Status, ViewModel},
    provider::{WeatherSource, fetch_report},
};

/// Shown for any fetch or normalize failure.
pub const USER_ERROR_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// What happened to a submitted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Blank city; nothing was fetched and state is untouched.
    Ignored,
    Applied,
    Failed,
    /// A newer query was submitted before this one finished; its result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Inner {
    seq: u64,
    view: ViewModel,
}

#[derive(Debug)]
pub struct WeatherController<S: ?Sized> {
    source: Arc<S>,
    state: Mutex<Inner>,
}

impl<S> WeatherController<S>
where
    S: WeatherSource + ?Sized,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source, state: Mutex::new(Inner::default()) }
    }

    /// Copy of the current view model for a renderer.
    pub fn snapshot(&self) -> ViewModel {
        self.state.lock().view.clone()
    }

    #[instrument(skip(self))]
    pub async fn submit_query(&self, city: &str) -> QueryOutcome {
        let Ok(query) = Query::new(city) else {
            debug!("blank city ignored");
            return QueryOutcome::Ignored;
        };

        let token = {
            let mut state = self.state.lock();
            state.seq += 1;
            state.view.status = Status::Loading;
            state.seq
        };

        let result = fetch_report(self.source.as_ref(), &query).await;

        let mut state = self.state.lock();
        if state.seq != token {
            debug!(token, latest = state.seq, "dropping superseded result");
            return QueryOutcome::Superseded;
        }

        match result {
            Ok(report) => {
                info!(city = %report.current.city, "weather updated");
                state.view = ViewModel {
                    status: Status::Idle,
                    current: Some(report.current),
                    forecast: report.forecast,
                };
                QueryOutcome::Applied
            }
            Err(e) => {
                // Previously displayed data is kept.
                warn!(error = %e, "weather query failed");
                state.view.status = Status::Error(USER_ERROR_MESSAGE.to_string());
                QueryOutcome::Failed
            }
        }
    }
}
