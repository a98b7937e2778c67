use crate::config::thresholds::*;
use crate::detector::signals::Signals;
use crate::types::{ForecastSnapshot, Mood};

/// Classify riding conditions for the day `offset` days ahead.
///
/// Short series degrade to smaller signals rather than failing. Callers that
/// need the offset day to exist check [`ForecastSnapshot::check_offset`] first.
pub fn classify(snapshot: &ForecastSnapshot, offset: usize) -> Mood {
    let today_max = snapshot.daily.first().map(|d| d.temperature_max);
    decide(&Signals::derive(snapshot, offset), today_max)
}

/// The rule chain. Order is priority: the first matching mood wins.
///
/// `today_max` is the max temperature of `daily[0]`, the present day, no matter
/// which offset the signals were derived for.
pub fn decide(s: &Signals, today_max: Option<f64>) -> Mood {
    let jumping = s.snow48h_mm >= POWDER_MM
        || s.snow2d_mm >= POWDER_MM
        || (s.snow48h_mm >= COLD_POWDER_MM && s.warm3d_count == 0);
    if jumping {
        return Mood::Jumping;
    }

    let thin = s.snow48h_mm < COLD_POWDER_MM;
    let sitting = (s.warm3d_count >= WARM_SHORT_STREAK && thin)
        || (s.sun3d_count >= SUN_SHORT_STREAK && thin)
        || s.freezethaw_count >= FREEZE_THAW_STREAK;
    if sitting {
        return Mood::Sitting;
    }

    let warm_today = today_max.is_some_and(|t| t >= TODAY_WARM_MAX_C);
    let sad_walk = (s.warm5d_count >= WARM_LONG_STREAK && s.sun5d_count >= SUN_LONG_STREAK)
        || (s.snow2d_mm == 0.0 && s.sun3d_count >= SUN_SHORT_STREAK && warm_today)
        || (s.snow48h_mm == 0.0 && s.sun5d_count >= SUN_DRY_STREAK);
    if sad_walk {
        return Mood::SadWalk;
    }

    Mood::Carving
}
