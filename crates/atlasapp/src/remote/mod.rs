//! # Remote Data Sources
//!
//! Two read-only HTTP sources feed atlas:
//!
//! - [`countries::CountryClient`]: country records (`/v3.1/all`,
//!   `/v3.1/alpha/{code}`, `/v3.1/all?fields=languages`).
//! - [`boundaries::BoundaryClient`]: GeoJSON borders
//!   (`/countries/{code}.geo.json`), with a timeout and an approximate
//!   fallback.
//!
//! Neither panics on bad responses: transport failures, non-2xx statuses and
//! undecodable bodies all come back as [`AtlasError`] values.
//!
//! ## Superseded requests
//!
//! Detail and boundary lookups are driven by whatever the user is looking at
//! right now. When they move on, an answer for the previous code must not land
//! on top of the new one. [`RequestTracker`] hands out a [`RequestTicket`] per
//! request; issuing a ticket supersedes every earlier one, and a superseded
//! ticket resolves to [`AtlasError::Superseded`] instead of its response,
//! whether the response was still in flight or had already arrived.

use crate::error::{AtlasError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

pub mod boundaries;
pub mod countries;

/// Issues request tickets; only the newest ticket is current.
#[derive(Clone)]
pub struct RequestTracker {
    latest: Arc<watch::Sender<u64>>,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            latest: Arc::new(tx),
        }
    }

    /// Start a new request, superseding all earlier ones.
    pub fn begin(&self) -> RequestTicket {
        let mut id = 0;
        self.latest.send_modify(|latest| {
            *latest += 1;
            id = *latest;
        });
        RequestTicket {
            id,
            rx: self.latest.subscribe(),
        }
    }

    /// Supersede every outstanding ticket without starting a new request.
    pub fn cancel_all(&self) {
        self.latest.send_modify(|latest| *latest += 1);
    }
}

pub struct RequestTicket {
    id: u64,
    rx: watch::Receiver<u64>,
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        *self.rx.borrow() == self.id
    }

    /// Resolves once a newer ticket has been issued.
    pub async fn superseded(&mut self) {
        loop {
            if !self.is_current() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Tracker dropped: nothing can supersede us anymore
                std::future::pending::<()>().await;
            }
        }
    }

    /// Drive `request` to completion unless superseded first. A result that
    /// arrives after supersession is discarded.
    pub async fn run<T, F>(mut self, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let id = self.id;
        tokio::select! {
            biased;
            _ = self.superseded() => {
                tracing::debug!(ticket = id, "request superseded while in flight");
                Err(AtlasError::Superseded)
            }
            result = request => {
                if self.is_current() {
                    result
                } else {
                    tracing::debug!(ticket = id, "discarding stale response");
                    Err(AtlasError::Superseded)
                }
            }
        }
    }
}

/// Fail with `AtlasError::Status` on any non-2xx response.
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AtlasError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}

pub(crate) fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("atlas/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_newest_ticket_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(first.is_current());

        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());

        tracker.cancel_all();
        assert!(!second.is_current());
    }

    #[tokio::test]
    async fn test_run_returns_result_when_current() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();
        let value = ticket.run(async { Ok::<_, AtlasError>(5) }).await.unwrap();
        assert_eq!(value, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_request_is_superseded() {
        let tracker = RequestTracker::new();
        let slow = tracker.begin();

        let slow_request = tokio::spawn(slow.run(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, AtlasError>("slow")
        }));

        tokio::time::sleep(Duration::from_millis(10)).await;
        let fast = tracker.begin();
        let fast_value = fast.run(async { Ok::<_, AtlasError>("fast") }).await;

        assert_eq!(fast_value.unwrap(), "fast");
        assert!(matches!(
            slow_request.await.unwrap(),
            Err(AtlasError::Superseded)
        ));
    }

    #[tokio::test]
    async fn test_response_after_supersession_is_discarded() {
        let tracker = RequestTracker::new();
        let stale = tracker.begin();
        let newer_tracker = tracker.clone();

        // The request itself supersedes its own ticket before completing
        let result = stale
            .run(async move {
                newer_tracker.begin();
                Ok::<_, AtlasError>(1)
            })
            .await;
        assert!(matches!(result, Err(AtlasError::Superseded)));
    }

    #[tokio::test]
    async fn test_errors_pass_through_when_current() {
        let tracker = RequestTracker::new();
        let result: Result<()> = tracker
            .begin()
            .run(async { Err(AtlasError::NotFound("XYZ".into())) })
            .await;
        assert!(matches!(result, Err(AtlasError::NotFound(_))));
    }
}
