//! Drag gesture classification
//!
//! Only the vertical component of a drag release matters. Negative values
//! point up the screen.

use serde::{Deserialize, Serialize};

/// Vertical offset and velocity of a drag at release
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragRelease {
    /// Pixels travelled since the drag started
    pub offset_y: f64,
    /// Pixels per second at release
    pub velocity_y: f64,
}

impl DragRelease {
    pub fn new(offset_y: f64, velocity_y: f64) -> Self {
        Self {
            offset_y,
            velocity_y,
        }
    }
}

/// Magnitudes a drag must exceed to count as a gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    pub distance: f64,
    pub velocity: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            distance: 50.0,
            velocity: 500.0,
        }
    }
}

/// What a drag release asks the drawer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureDecision {
    Expand,
    Collapse,
    NoOp,
}

impl GestureDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureDecision::Expand => "expand",
            GestureDecision::Collapse => "collapse",
            GestureDecision::NoOp => "noop",
        }
    }
}

/// Classify a drag release
///
/// Either a long drag or a fast flick is enough. Upward gestures are checked
/// first. NaN never exceeds a threshold, so it classifies as `NoOp`.
pub fn classify(release: DragRelease, thresholds: GestureThresholds) -> GestureDecision {
    let DragRelease {
        offset_y,
        velocity_y,
    } = release;

    if offset_y < -thresholds.distance || velocity_y < -thresholds.velocity {
        GestureDecision::Expand
    } else if offset_y > thresholds.distance || velocity_y > thresholds.velocity {
        GestureDecision::Collapse
    } else {
        GestureDecision::NoOp
    }
}
