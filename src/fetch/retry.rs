use super::client::HttpClient;
use std::time::Duration;
use tracing::warn;

/// An [`HttpClient`] wrapper that retries transient failures with
/// exponential backoff.
///
/// Connect errors, timeouts, and 5xx responses are retried up to
/// `max_attempts` total attempts with a doubling delay. 4xx responses and
/// other errors are returned immediately; retrying those would just burn
/// quota.
pub struct Retry<C> {
    inner: C,
    max_attempts: u32,
    base_delay: Duration,
}

impl<C> Retry<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    #[cfg(test)]
    pub fn with_delay(inner: C, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_attempts,
            base_delay,
        }
    }
}

fn retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

impl<C: HttpClient> HttpClient for Retry<C> {
    fn execute(
        &self,
        req: reqwest::blocking::Request,
    ) -> reqwest::Result<reqwest::blocking::Response> {
        let mut delay = self.base_delay;

        for attempt in 1..self.max_attempts {
            // Requests with a streaming body cannot be cloned or retried.
            let Some(cloned) = req.try_clone() else {
                return self.inner.execute(req);
            };

            match self.inner.execute(cloned) {
                Ok(resp) if resp.status().is_server_error() => {
                    warn!(attempt, status = %resp.status(), "Server error, retrying");
                }
                Ok(resp) => return Ok(resp),
                Err(err) if retryable_error(&err) => {
                    warn!(attempt, error = %err, "Transport error, retrying");
                }
                Err(err) => return Err(err),
            }

            std::thread::sleep(delay);
            delay *= 2;
        }

        self.inner.execute(req)
    }
}
