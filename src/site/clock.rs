use std::time::SystemTime;

/// Source of the formatted current time used for the `Date` header.
pub trait Clock: Send + Sync {
    fn now(&self) -> String;
}

/// Wall-clock time in IMF-fixdate form, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        httpdate::fmt_http_date(SystemTime::now())
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}
