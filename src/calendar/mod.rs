//! Calendar domain: the clock that drives Homestead's days.
//!
//! Responsible for:
//! - Advancing game time (minutes, hours) without wrapping past midnight
//! - Deciding when the day is over (2 AM = hour 26)
//! - Rolling over days and seasons
//! - Wall-clock queries: shop hours, night, display strings
//! - Logging DayEndEvent / SeasonChangeEvent as they happen

use bevy::prelude::*;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DayEndEvent>()
            .add_event::<SeasonChangeEvent>()
            .add_systems(Update, (log_day_end, log_season_change));
    }
}

fn log_day_end(mut events: EventReader<DayEndEvent>, state: Res<GameState>) {
    for ev in events.read() {
        info!(
            "[Calendar] Day ended: {} {}{}, now {}",
            ev.season.name(),
            ev.day,
            if ev.passed_out { " (passed out)" } else { "" },
            date_string(&state.time)
        );
    }
}

fn log_season_change(mut events: EventReader<SeasonChangeEvent>) {
    for ev in events.read() {
        info!("[Calendar] Season changed to {}", ev.new_season.name());
    }
}

// ─── Clock operations ─────────────────────────────────────────────────────────

pub fn create_time() -> TimeState {
    TimeState::default()
}

/// Add whole minutes, carrying into the hour. The hour is allowed to run
/// past 24; only `start_new_day` resets it.
pub fn advance_time(time: &mut TimeState, minutes: u32) {
    time.minute += minutes;
    while time.minute >= 60 {
        time.minute -= 60;
        time.hour += 1;
    }
}

/// Feed real seconds into the clock at `MINUTES_PER_TICK` game-minutes per
/// second. Fractions carry over in `pending_minutes`.
pub fn advance_time_by_seconds(time: &mut TimeState, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    time.pending_minutes += MINUTES_PER_TICK * dt;
    let whole = time.pending_minutes.floor();
    time.pending_minutes -= whole;
    advance_time(time, whole as u32);
}

pub fn is_day_over(time: &TimeState) -> bool {
    time.hour >= DAY_END_HOUR
}

/// Next morning at 6:00. Day 29 becomes day 1 of the next season.
pub fn start_new_day(time: &mut TimeState) {
    time.day += 1;
    time.hour = DAY_START_HOUR;
    time.minute = 0;
    time.pending_minutes = 0.0;

    if time.day > DAYS_PER_SEASON {
        time.day = 1;
        time.season = time.season.next();
    }
}

/// Wall-clock hour: 25 -> 1.
pub fn hour_24(time: &TimeState) -> u32 {
    if time.hour >= 24 {
        time.hour - 24
    } else {
        time.hour
    }
}

pub fn is_shop_open(time: &TimeState) -> bool {
    (SHOP_OPEN_HOUR..SHOP_CLOSE_HOUR).contains(&hour_24(time))
}

pub fn is_night_time(time: &TimeState) -> bool {
    let hour = hour_24(time);
    hour >= NIGHT_START_HOUR || hour < DAY_START_HOUR
}

/// "6:00 AM", "12:30 PM", "1:10 AM".
pub fn time_string(time: &TimeState) -> String {
    let hour = hour_24(time);
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let ampm = if (12..24).contains(&hour) { "PM" } else { "AM" };
    format!("{}:{:02} {}", display_hour, time.minute, ampm)
}

/// "Spring 3".
pub fn date_string(time: &TimeState) -> String {
    format!("{} {}", time.season.name(), time.day)
}

pub fn season_index(time: &TimeState) -> usize {
    time.season.index()
}
