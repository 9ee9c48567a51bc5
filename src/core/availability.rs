use chrono::{DateTime, Duration, FixedOffset, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::{Interval, OverlapView};

pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 3;
pub const DEFAULT_MAX_OVERLAPS: usize = 5;

#[inline]
fn one_hour() -> Duration {
    Duration::hours(1)
}

/// Truncate to the start of the hour
pub fn floor_to_hour(dt: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = Duration::seconds(i64::from(dt.minute()) * 60 + i64::from(dt.second()))
        + Duration::nanoseconds(i64::from(dt.nanosecond()));
    dt - into_hour
}

/// Round up to the next whole hour; whole hours are unchanged
pub fn ceil_to_hour(dt: DateTime<Utc>) -> DateTime<Utc> {
    let floor = floor_to_hour(dt);
    if floor == dt {
        dt
    } else {
        floor + one_hour()
    }
}

/// Drop empty windows, clip the rest to `[now, horizon)` and sort by start
fn clip_to_horizon(windows: &[Interval], now: DateTime<Utc>, horizon: DateTime<Utc>) -> Vec<Interval> {
    let mut clipped: Vec<Interval> = windows
        .iter()
        .filter(|w| w.end > w.start)
        .filter(|w| w.end > now && w.start < horizon)
        .map(|w| Interval::new(w.start.max(now), w.end.min(horizon)))
        .collect();

    clipped.sort_by_key(|w| w.start);
    clipped
}

/// Find schedulable whole-hour blocks shared by two availability lists
///
/// Each list is expected to be internally non-overlapping. Windows are first
/// clipped to `[now, now + lookahead_days)`; every raw overlap found by the
/// sweep is then shrunk to whole-hour boundaries and kept only if at least one
/// hour remains. Output is ascending by start and holds at most `max_items`
/// blocks, each a positive whole number of hours.
pub fn intersect_hourly_windows(
    windows_a: &[Interval],
    windows_b: &[Interval],
    now: DateTime<Utc>,
    lookahead_days: u32,
    max_items: usize,
) -> Vec<Interval> {
    let horizon = now
        .checked_add_signed(Duration::days(i64::from(lookahead_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let a = clip_to_horizon(windows_a, now, horizon);
    let b = clip_to_horizon(windows_b, now, horizon);

    let mut results = Vec::with_capacity(max_items.min(a.len() + b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() && results.len() < max_items {
        let start = a[i].start.max(b[j].start);
        let end = a[i].end.min(b[j].end);

        if end > start {
            let start_aligned = ceil_to_hour(start);
            let end_aligned = floor_to_hour(end);

            if end_aligned - start_aligned >= one_hour() {
                let hours = (end_aligned - start_aligned).num_hours();
                results.push(Interval::new(start_aligned, start_aligned + Duration::hours(hours)));
            }
        }

        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }

    tracing::trace!(
        a = a.len(),
        b = b.len(),
        overlaps = results.len(),
        "Intersected availability windows"
    );

    results
}

fn parse_zone(name: &str) -> Option<Tz> {
    match name.trim().parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            tracing::debug!("Ignoring unknown time zone: {}", name);
            None
        }
    }
}

#[inline]
fn to_local(dt: DateTime<Utc>, tz: Tz) -> DateTime<FixedOffset> {
    dt.with_timezone(&tz).fixed_offset()
}

/// Attach each side's wall-clock view to a list of UTC overlaps
///
/// A side whose zone is missing or not a known IANA name gets no local
/// fields; the UTC window is always present.
pub fn localize_overlaps(overlaps: &[Interval], a_tz: Option<&str>, b_tz: Option<&str>) -> Vec<OverlapView> {
    let a_zone = a_tz.and_then(|name| parse_zone(name).map(|tz| (name, tz)));
    let b_zone = b_tz.and_then(|name| parse_zone(name).map(|tz| (name, tz)));

    overlaps
        .iter()
        .map(|window| {
            let mut view = OverlapView::from(*window);
            if let Some((name, tz)) = a_zone {
                view.a_local_start = Some(to_local(window.start, tz));
                view.a_local_end = Some(to_local(window.end, tz));
                view.a_tz = Some(name.to_string());
            }
            if let Some((name, tz)) = b_zone {
                view.b_local_start = Some(to_local(window.start, tz));
                view.b_local_end = Some(to_local(window.end, tz));
                view.b_tz = Some(name.to_string());
            }
            view
        })
        .collect()
}
