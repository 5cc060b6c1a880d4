use kart_engine::{Rect, Vec2};

use crate::app::config::SpeedConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Zone {
    #[default]
    OffTrack,
    Track,
    Boost,
}

impl Zone {
    pub(crate) fn speed(self, speeds: &SpeedConfig) -> f32 {
        match self {
            Zone::OffTrack => speeds.off_track,
            Zone::Track => speeds.on_track,
            Zone::Boost => speeds.boost,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Zone::OffTrack => "off",
            Zone::Track => "track",
            Zone::Boost => "boost",
        }
    }
}

/// Classifies a hull reference point. Boost beats track, track beats off-track.
pub(crate) fn classify(point: Vec2, track: &[Rect], boosts: &[Rect]) -> Zone {
    if boosts.iter().any(|panel| panel.contains_point(point)) {
        Zone::Boost
    } else if track.iter().any(|segment| segment.contains_point(point)) {
        Zone::Track
    } else {
        Zone::OffTrack
    }
}
