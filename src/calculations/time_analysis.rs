//! Time analysis derivations (drilling totals, mobilization, efficiency)

use super::CalcError;
use crate::parsing::hhmm_to_time;
use chrono::{Days, NaiveDate, NaiveDateTime};

/// TOTAL DRILLING TIME (HRS) = ROTARY TIME + SLIDING TIME
pub fn total_drilling_time_hours(rotary_time_hrs: f64, sliding_time_hrs: f64) -> f64 {
    rotary_time_hrs + sliding_time_hrs
}

/// TOTAL DRILLING (METER) = ROTARY (METER) + SLIDING (METER)
pub fn total_drilling_meters(rotary_m: f64, sliding_m: f64) -> f64 {
    rotary_m + sliding_m
}

/// Combine a date with HH:MM input; `24:00` is midnight of the following day.
fn instant(date: NaiveDate, hhmm: &str) -> Result<NaiveDateTime, CalcError> {
    let (time, rolls_over) = hhmm_to_time(hhmm)?;
    let day = if rolls_over {
        date.checked_add_days(Days::new(1))
            .ok_or(CalcError::NegativeDuration)?
    } else {
        date
    };
    Ok(day.and_time(time))
}

/// MOB TO RELEASE (HRS): (call-out date + crew mob time) -> (release date + release time).
///
/// Fails if either time is malformed or the release precedes the mobilization.
pub fn mob_to_release_hours(
    call_out_date: NaiveDate,
    crew_mob_time_hhmm: &str,
    release_date: NaiveDate,
    release_time_hhmm: &str,
) -> Result<f64, CalcError> {
    let mob = instant(call_out_date, crew_mob_time_hhmm)?;
    let release = instant(release_date, release_time_hhmm)?;

    let hours = (release - mob).num_seconds() as f64 / 3600.0;
    if hours < 0.0 {
        return Err(CalcError::NegativeDuration);
    }
    Ok(hours)
}

/// %EFF DRILLING = (DRILLING TIME / BRT TIME) × 100
///
/// Zero drilling time gives 0; zero BRT also gives 0 rather than a division
/// error, whatever the drilling time.
pub fn eff_drilling_percent(drilling_time_hrs: f64, total_brt_hrs: f64) -> f64 {
    if drilling_time_hrs <= 0.0 {
        return 0.0;
    }
    if total_brt_hrs <= 0.0 {
        return 0.0;
    }
    (drilling_time_hrs / total_brt_hrs) * 100.0
}
