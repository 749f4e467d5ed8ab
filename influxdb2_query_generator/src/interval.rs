//! The simulation interval queries are generated against, and random windows inside it.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Timelike, Utc};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::go_rand::GoRngExt;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A half-open time range `[start, end)` with nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start_ns: i64,
    end_ns: i64,
}

impl TimeInterval {
    /// Create an interval, failing unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let start_ns = start
            .timestamp_nanos_opt()
            .ok_or_else(|| Error::TimestampOutOfRange(start.to_rfc3339()))?;
        let end_ns = end
            .timestamp_nanos_opt()
            .ok_or_else(|| Error::TimestampOutOfRange(end.to_rfc3339()))?;
        Self::from_unix_nanos(start_ns, end_ns)
    }

    pub fn from_unix_nanos(start_ns: i64, end_ns: i64) -> Result<Self> {
        if end_ns <= start_ns {
            return Err(Error::InvalidInterval {
                start: format_timestamp(start_ns),
                end: format_timestamp(end_ns),
            });
        }
        Ok(Self { start_ns, end_ns })
    }

    pub fn start(&self) -> DateTime<Utc> {
        Utc.timestamp_nanos(self.start_ns)
    }

    pub fn start_unix_nano(&self) -> i64 {
        self.start_ns
    }

    pub fn end_unix_nano(&self) -> i64 {
        self.end_ns
    }

    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.end_ns.abs_diff(self.start_ns))
    }

    /// The start rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn start_string(&self) -> String {
        format_timestamp(self.start_ns)
    }

    /// The end rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn end_string(&self) -> String {
        format_timestamp(self.end_ns)
    }

    /// Seconds elapsed since midnight (UTC) at the start of the interval.
    pub fn start_seconds_of_day(&self) -> u32 {
        let start = self.start();
        start.hour() * 3600 + start.minute() * 60 + start.second()
    }

    /// Pick a sub-interval of exactly `window` uniformly at random.
    ///
    /// Consumes one bounded 63-bit draw from `rng`. Fails when `window` does not fit strictly
    /// inside the interval.
    pub fn rand_window<R>(&self, rng: &mut R, window: Duration) -> Result<Self>
    where
        R: RngCore + ?Sized,
    {
        let too_large = || Error::WindowTooLarge {
            window: GoDuration(window),
            interval: GoDuration(self.duration()),
        };

        let window_ns = i64::try_from(window.as_nanos()).map_err(|_| too_large())?;
        let lower = self.start_ns;
        let upper = self.end_ns.checked_sub(window_ns).ok_or_else(too_large)?;
        let span = upper
            .checked_sub(lower)
            .filter(|span| *span > 0)
            .ok_or_else(too_large)?;

        let start_ns = lower + rng.int63n(span);
        Ok(Self {
            start_ns,
            end_ns: start_ns + window_ns,
        })
    }
}

fn format_timestamp(ns: i64) -> String {
    Utc.timestamp_nanos(ns).format(TIMESTAMP_FORMAT).to_string()
}

/// Renders a [`Duration`] in the compact notation the harness uses in labels and messages,
/// e.g. `1s`, `1m0s`, `12h0m0s`, `1.5s` or `250ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoDuration(pub Duration);

impl fmt::Display for GoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.as_nanos();
        if nanos == 0 {
            return f.write_str("0s");
        }

        if nanos < 1_000_000_000 {
            let (unit, precision) = match nanos {
                n if n < 1_000 => return write!(f, "{n}ns"),
                n if n < 1_000_000 => ("µs", 3),
                _ => ("ms", 6),
            };
            let (whole, frac) = split_fraction(nanos, precision);
            return write!(f, "{whole}{frac}{unit}");
        }

        let (secs, frac) = split_fraction(nanos, 9);
        let hours = secs / 3600;
        let minutes = secs / 60 % 60;
        if hours > 0 {
            write!(f, "{hours}h{minutes}m")?;
        } else if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{}{frac}s", secs % 60)
    }
}

/// Split `v` into `v / 10^precision` and its fractional digits (`.5`, `.25`, or empty), with
/// trailing zeros removed.
fn split_fraction(v: u128, precision: u32) -> (u128, String) {
    let pow = 10u128.pow(precision);
    let frac = v % pow;
    if frac == 0 {
        return (v / pow, String::new());
    }

    let digits = format!("{frac:0width$}", width = precision as usize);
    (v / pow, format!(".{}", digits.trim_end_matches('0')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::go_rand::GoRand;
    use proptest::prelude::*;

    const HOUR: Duration = Duration::from_secs(3600);

    fn epoch_plus(span: Duration) -> TimeInterval {
        TimeInterval::from_unix_nanos(0, span.as_nanos() as i64).unwrap()
    }

    #[test]
    fn renders_second_precision_utc() {
        let interval = TimeInterval::new(
            "2016-01-01T00:00:00.999Z".parse().unwrap(),
            "2016-01-02T06:00:00Z".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(interval.start_string(), "2016-01-01T00:00:00Z");
        assert_eq!(interval.end_string(), "2016-01-02T06:00:00Z");
        assert_eq!(interval.duration(), Duration::from_millis(108_000_000 - 999));
    }

    #[test]
    fn rejects_empty_and_reversed_intervals() {
        assert!(matches!(
            TimeInterval::from_unix_nanos(5, 5),
            Err(Error::InvalidInterval { .. })
        ));
        assert!(matches!(
            TimeInterval::from_unix_nanos(6, 5),
            Err(Error::InvalidInterval { .. })
        ));
    }

    #[test]
    fn rand_window_matches_reference_draw() {
        let mut rng = GoRand::new(123);
        let window = epoch_plus(HOUR)
            .rand_window(&mut rng, Duration::from_secs(1))
            .unwrap();
        assert_eq!(window.start_string(), "1970-01-01T00:05:58Z");
        assert_eq!(window.end_string(), "1970-01-01T00:05:59Z");
    }

    #[test]
    fn rand_window_too_large() {
        let mut rng = GoRand::new(123);
        let interval = epoch_plus(8 * HOUR);

        let err = interval.rand_window(&mut rng, 8 * HOUR).unwrap_err();
        assert_eq!(
            err.to_string(),
            "random window equal to or larger than TimeInterval: window 8h0m0s, interval 8h0m0s"
        );

        let err = interval.rand_window(&mut rng, 12 * HOUR).unwrap_err();
        assert_eq!(
            err.to_string(),
            "random window equal to or larger than TimeInterval: window 12h0m0s, interval 8h0m0s"
        );

        // failed attempts leave the source untouched
        let window = epoch_plus(HOUR)
            .rand_window(&mut rng, Duration::from_secs(1))
            .unwrap();
        assert_eq!(window.start_string(), "1970-01-01T00:05:58Z");
    }

    #[test]
    fn seconds_of_day() {
        let interval = TimeInterval::new(
            "2016-01-01T13:04:05Z".parse().unwrap(),
            "2016-01-02T00:00:00Z".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(interval.start_seconds_of_day(), 13 * 3600 + 4 * 60 + 5);
        assert_eq!(epoch_plus(HOUR).start_seconds_of_day(), 0);
    }

    #[test]
    fn go_duration_notation() {
        let cases = [
            (Duration::ZERO, "0s"),
            (Duration::from_nanos(10), "10ns"),
            (Duration::from_micros(10), "10µs"),
            (Duration::from_nanos(1_500), "1.5µs"),
            (Duration::from_millis(250), "250ms"),
            (Duration::from_secs(1), "1s"),
            (Duration::from_millis(1_500), "1.5s"),
            (Duration::from_secs(60), "1m0s"),
            (Duration::from_secs(600), "10m0s"),
            (HOUR, "1h0m0s"),
            (12 * HOUR, "12h0m0s"),
            (Duration::from_secs(26 * 3600 + 61), "26h1m1s"),
        ];
        for (duration, want) in cases {
            assert_eq!(GoDuration(duration).to_string(), want, "{duration:?}");
        }
    }

    proptest! {
        #[test]
        fn windows_stay_inside_the_interval(
            seed in any::<i64>(),
            start in -1_000_000_000_000i64..1_000_000_000_000,
            span in 2u64..100_000_000_000_000,
            fraction in 0.0f64..1.0,
        ) {
            let interval = TimeInterval::from_unix_nanos(start, start + span as i64).unwrap();
            let window = Duration::from_nanos(((span - 1) as f64 * fraction) as u64);
            let mut rng = GoRand::new(seed);

            let got = interval.rand_window(&mut rng, window).unwrap();
            prop_assert!(got.start_unix_nano() >= interval.start_unix_nano());
            prop_assert!(got.end_unix_nano() <= interval.end_unix_nano());
            prop_assert_eq!(got.duration(), window);
        }
    }
}
