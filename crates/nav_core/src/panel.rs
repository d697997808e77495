//! Presentation helpers for the route summary panel.

/// "850 m" below a kilometer, "3.3 km" at or above. Kilometers round half
/// away from zero at one decimal, not half-to-even.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", (meters / 100.0).round() / 10.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

/// Whole minutes (floored), split into hours past the hour mark.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    if minutes >= 60 {
        format!("{} hr {} min", minutes / 60, minutes % 60)
    } else {
        format!("{} min", minutes)
    }
}

/// Glyph class for a turn-by-turn step, derived from the resolver's maneuver
/// type and optional modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManeuverGlyph {
    Depart,
    Arrive,
    TurnLeft,
    TurnRight,
    Straight,
}

impl ManeuverGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            ManeuverGlyph::Depart => "●",
            ManeuverGlyph::Arrive => "◉",
            ManeuverGlyph::TurnLeft => "↰",
            ManeuverGlyph::TurnRight => "↱",
            ManeuverGlyph::Straight => "↑",
        }
    }
}

pub fn glyph_for(maneuver: &str, modifier: Option<&str>) -> ManeuverGlyph {
    let maneuver = maneuver.to_ascii_lowercase();
    if maneuver.contains("arrive") || maneuver.contains("end") {
        return ManeuverGlyph::Arrive;
    }
    if maneuver.contains("depart") || maneuver.contains("start") {
        return ManeuverGlyph::Depart;
    }
    match modifier.map(str::to_ascii_lowercase) {
        Some(modifier) if modifier.contains("left") => ManeuverGlyph::TurnLeft,
        Some(modifier) if modifier.contains("right") => ManeuverGlyph::TurnRight,
        _ => ManeuverGlyph::Straight,
    }
}
