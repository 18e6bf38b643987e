use crate::domain::models::appointment_type::AppointmentType;
use crate::domain::models::availability::AvailabilityRule;
use crate::domain::models::resource::{Resource, StaffUser};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Working window used by the interactive day query when an appointment type
/// has no availability rules at all.
pub const DEFAULT_WINDOW: (f64, f64) = (9.0, 18.0);

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub capacity: i32,
}

fn hours_to_time(hours: f64) -> NaiveTime {
    let total_minutes = (hours * 60.0).round() as u32;
    NaiveTime::from_hms_opt(total_minutes / 60, total_minutes % 60, 0)
        .unwrap_or(NaiveTime::MIN)
}

fn duration_from_hours(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

/// Weekday index in the source convention: 0 = Monday .. 6 = Sunday.
fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_monday() as i32
}

/// Resolve the working-hours calendar for a scope, by priority: rules scoped
/// to the resource, then rules scoped to the staff member (directly or via
/// their resource), then unscoped rules. `None` means no calendar resolves
/// and every candidate is accepted.
pub fn resolve_calendar<'a>(
    rules: &'a [AvailabilityRule],
    resource: Option<&Resource>,
    staff: Option<&StaffUser>,
) -> Option<Vec<&'a AvailabilityRule>> {
    if let Some(res) = resource {
        let scoped: Vec<_> = rules
            .iter()
            .filter(|r| r.resource_id.as_deref() == Some(res.id.as_str()))
            .collect();
        if !scoped.is_empty() {
            return Some(scoped);
        }
    }
    if let Some(st) = staff {
        let scoped: Vec<_> = rules
            .iter()
            .filter(|r| {
                r.staff_user_id.as_deref() == Some(st.id.as_str())
                    || (r.resource_id.is_some() && r.resource_id == st.resource_id)
            })
            .collect();
        if !scoped.is_empty() {
            return Some(scoped);
        }
    }
    let unscoped: Vec<_> = rules
        .iter()
        .filter(|r| r.resource_id.is_none() && r.staff_user_id.is_none())
        .collect();
    if unscoped.is_empty() {
        None
    } else {
        Some(unscoped)
    }
}

fn intersects_calendar(
    calendar: &[&AvailabilityRule],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    let day = start.date_naive();
    let weekday = weekday_index(day);
    calendar.iter().any(|rule| {
        if rule.weekday != weekday {
            return false;
        }
        let win_start = Utc
            .from_utc_datetime(&day.and_time(hours_to_time(rule.hour_from)));
        let win_end = Utc.from_utc_datetime(&day.and_time(hours_to_time(rule.hour_to)));
        start < win_end && end > win_start
    })
}

/// Sweep candidate slots over `[start, end)` at the type's interval.
/// Pure and restartable: identical inputs yield an identical sequence.
pub fn generate(
    appointment_type: &AppointmentType,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    resource: Option<&Resource>,
    staff: Option<&StaffUser>,
    rules: &[AvailabilityRule],
) -> Vec<CandidateSlot> {
    let duration = duration_from_hours(appointment_type.slot_duration);
    let interval = duration_from_hours(appointment_type.interval_hours());
    if duration <= Duration::zero() || interval <= Duration::zero() {
        return Vec::new();
    }

    let calendar = resolve_calendar(rules, resource, staff);
    let capacity = resource.map(|r| r.capacity).unwrap_or(1);

    let mut slots = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let slot_end = cursor + duration;
        let is_working = match &calendar {
            Some(windows) => intersects_calendar(windows, cursor, slot_end),
            None => true,
        };
        if is_working {
            slots.push(CandidateSlot {
                start: cursor,
                end: slot_end,
                capacity,
            });
        }
        cursor += interval;
    }
    slots
}

/// Working windows for one day of the interactive query path. Availability
/// rules are the source of truth; the fixed 09:00-18:00 window applies only
/// when the type has no rules at all.
pub fn day_windows(
    date: NaiveDate,
    rules: &[AvailabilityRule],
    resource: Option<&Resource>,
    staff: Option<&StaffUser>,
) -> Vec<(NaiveTime, NaiveTime)> {
    match resolve_calendar(rules, resource, staff) {
        Some(calendar) => {
            let weekday = weekday_index(date);
            let mut windows: Vec<_> = calendar
                .iter()
                .filter(|r| r.weekday == weekday)
                .map(|r| (hours_to_time(r.hour_from), hours_to_time(r.hour_to)))
                .collect();
            windows.sort();
            windows
        }
        None => vec![(
            hours_to_time(DEFAULT_WINDOW.0),
            hours_to_time(DEFAULT_WINDOW.1),
        )],
    }
}

/// Candidate start/end pairs for one day, already filtered by the minimum
/// booking notice. Capacity accounting happens against live booking counts
/// in the caller.
pub fn day_candidates(
    appointment_type: &AppointmentType,
    date: NaiveDate,
    windows: &[(NaiveTime, NaiveTime)],
    now: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let duration = duration_from_hours(appointment_type.slot_duration);
    let interval = duration_from_hours(appointment_type.interval_hours());
    if duration <= Duration::zero() || interval <= Duration::zero() {
        return Vec::new();
    }
    let min_booking_time = now + duration_from_hours(appointment_type.min_booking_hours);

    let mut candidates = Vec::new();
    for (win_from, win_to) in windows {
        let mut current = Utc.from_utc_datetime(&date.and_time(*win_from));
        let window_end = Utc.from_utc_datetime(&date.and_time(*win_to));
        while current + duration <= window_end {
            if current >= min_booking_time {
                candidates.push((current, current + duration));
            }
            current += interval;
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::appointment_type::{Category, LocationType};

    fn test_type(duration: f64, interval: Option<f64>) -> AppointmentType {
        AppointmentType {
            id: "t1".into(),
            company_id: "c1".into(),
            name: "Consultation".into(),
            category: Category::Meeting,
            description: None,
            location_type: LocationType::Online,
            location_address: None,
            video_link: None,
            sequence: 10,
            active: true,
            is_published: true,
            slot_duration: duration,
            slot_interval: interval,
            max_booking_days: 30,
            min_booking_hours: 1.0,
            cancel_before_hours: 1.0,
            manage_capacity: false,
            auto_confirm: true,
            auto_confirm_capacity_percent: 100,
            require_payment: false,
            payment_amount: 0.0,
            payment_per_person: false,
            currency: "USD".into(),
            timezone: "UTC".into(),
            created_at: Utc::now(),
        }
    }

    fn rule(weekday: i32, from: f64, to: f64) -> AvailabilityRule {
        AvailabilityRule::new("t1".into(), weekday, from, to, None, None)
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn no_rules_means_always_open() {
        let at = test_type(1.0, Some(1.0));
        // 2026-09-07 is a Monday
        let slots = generate(&at, utc(2026, 9, 7, 8, 0), utc(2026, 9, 7, 12, 0), None, None, &[]);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].start, utc(2026, 9, 7, 8, 0));
        assert_eq!(slots[0].capacity, 1);
    }

    #[test]
    fn rules_filter_candidates_to_working_hours() {
        let at = test_type(1.0, Some(1.0));
        let rules = vec![rule(0, 9.0, 11.0)];
        let slots = generate(&at, utc(2026, 9, 7, 0, 0), utc(2026, 9, 8, 0, 0), None, None, &rules);
        // 09:00 and 10:00 fall inside; the 08:00 candidate only touches 09:00
        // at its end and is excluded, 11:00 starts at the window edge.
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert!(starts.contains(&utc(2026, 9, 7, 9, 0)));
        assert!(starts.contains(&utc(2026, 9, 7, 10, 0)));
        assert!(!starts.contains(&utc(2026, 9, 7, 11, 0)));
        assert!(!starts.contains(&utc(2026, 9, 7, 7, 0)));
    }

    #[test]
    fn generation_is_deterministic_and_restartable() {
        let at = test_type(0.5, Some(0.5));
        let rules = vec![rule(0, 9.0, 18.0), rule(2, 13.5, 17.0)];
        let a = generate(&at, utc(2026, 9, 7, 0, 0), utc(2026, 9, 14, 0, 0), None, None, &rules);
        let b = generate(&at, utc(2026, 9, 7, 0, 0), utc(2026, 9, 14, 0, 0), None, None, &rules);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn resource_scoped_rules_take_priority() {
        let res = Resource::new("c1".into(), "Court A".into(), 4);
        let mut scoped = rule(0, 10.0, 12.0);
        scoped.resource_id = Some(res.id.clone());
        let rules = vec![rule(0, 9.0, 18.0), scoped];

        let calendar = resolve_calendar(&rules, Some(&res), None).unwrap();
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar[0].hour_from, 10.0);

        let at = test_type(1.0, Some(1.0));
        let slots = generate(&at, utc(2026, 9, 7, 0, 0), utc(2026, 9, 8, 0, 0), Some(&res), None, &rules);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| s.capacity == 4));
    }

    #[test]
    fn staff_inherits_their_resource_calendar() {
        let res = Resource::new("c1".into(), "Desk".into(), 1);
        let staff = StaffUser::new("c1".into(), "Ada".into(), "ada@x.io".into(), Some(res.id.clone()));
        let mut scoped = rule(0, 14.0, 16.0);
        scoped.resource_id = Some(res.id.clone());
        let rules = vec![scoped];
        let calendar = resolve_calendar(&rules, None, Some(&staff)).unwrap();
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn day_candidates_respect_min_notice_and_window_end() {
        let at = test_type(1.0, Some(1.0));
        let date = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        let windows = day_windows(date, &[], None, None);
        assert_eq!(windows, vec![(hours_to_time(9.0), hours_to_time(18.0))]);

        // Query before 08:00: the 09:00 slot is still offered.
        let early = utc(2026, 9, 7, 7, 30);
        let candidates = day_candidates(&at, date, &windows, early);
        assert_eq!(candidates.first().unwrap().0, utc(2026, 9, 7, 9, 0));
        // 17:00 is the last start fitting before 18:00.
        assert_eq!(candidates.last().unwrap().0, utc(2026, 9, 7, 17, 0));
        assert_eq!(candidates.len(), 9);

        // Query at 10:30 with one hour notice: first offer is 12:00, the
        // next interval boundary at or after 11:30.
        let late = utc(2026, 9, 7, 10, 30);
        let candidates = day_candidates(&at, date, &windows, late);
        assert_eq!(candidates.first().unwrap().0, utc(2026, 9, 7, 12, 0));
    }

    #[test]
    fn fractional_hours_convert_to_minutes() {
        assert_eq!(hours_to_time(9.5), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(hours_to_time(17.25), NaiveTime::from_hms_opt(17, 15, 0).unwrap());
    }
}
