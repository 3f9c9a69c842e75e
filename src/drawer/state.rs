//! Annotation drawer state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::gesture::{classify, DragRelease, GestureDecision, GestureThresholds};
use crate::config::DrawerConfig;

/// Visibility of the bottom sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerState {
    #[default]
    Closed,
    Collapsed,
    Expanded,
}

impl DrawerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawerState::Closed => "closed",
            DrawerState::Collapsed => "collapsed",
            DrawerState::Expanded => "expanded",
        }
    }
}

/// A state name other than `closed`, `collapsed` or `expanded`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown drawer state {0:?}")]
pub struct UnknownDrawerState(pub String);

impl FromStr for DrawerState {
    type Err = UnknownDrawerState;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "closed" => Ok(DrawerState::Closed),
            "collapsed" => Ok(DrawerState::Collapsed),
            "expanded" => Ok(DrawerState::Expanded),
            other => Err(UnknownDrawerState(other.to_string())),
        }
    }
}

impl fmt::Display for DrawerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS length the renderer animates the drawer to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum DrawerHeight {
    /// Percentage of the parent
    Percent(f32),
    /// Percentage of the viewport height
    Vh(f32),
}

impl fmt::Display for DrawerHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawerHeight::Percent(v) => write!(f, "{}%", v),
            DrawerHeight::Vh(v) => write!(f, "{}vh", v),
        }
    }
}

/// Target height for each state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawerHeights {
    pub closed: DrawerHeight,
    pub collapsed: DrawerHeight,
    pub expanded: DrawerHeight,
}

impl Default for DrawerHeights {
    fn default() -> Self {
        Self {
            closed: DrawerHeight::Percent(0.0),
            collapsed: DrawerHeight::Vh(35.0),
            expanded: DrawerHeight::Vh(75.0),
        }
    }
}

impl DrawerHeights {
    pub fn for_state(&self, state: DrawerState) -> DrawerHeight {
        match state {
            DrawerState::Closed => self.closed,
            DrawerState::Collapsed => self.collapsed,
            DrawerState::Expanded => self.expanded,
        }
    }
}

/// State machine behind the annotation drawer
///
/// Every transition is valid from every state, and the last one applied wins.
#[derive(Debug, Clone, Default)]
pub struct Drawer {
    state: DrawerState,
    heights: DrawerHeights,
    thresholds: GestureThresholds,
}

impl Drawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DrawerConfig) -> Self {
        Self {
            thresholds: config.thresholds(),
            ..Self::default()
        }
    }

    pub fn with_heights(mut self, heights: DrawerHeights) -> Self {
        self.heights = heights;
        self
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn height(&self) -> DrawerHeight {
        self.heights.for_state(self.state)
    }

    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    pub fn is_open(&self) -> bool {
        self.state != DrawerState::Closed
    }

    pub fn expand(&mut self) {
        self.set_state(DrawerState::Expanded);
    }

    pub fn collapse(&mut self) {
        self.set_state(DrawerState::Collapsed);
    }

    pub fn close(&mut self) {
        self.set_state(DrawerState::Closed);
    }

    pub fn set_state(&mut self, state: DrawerState) {
        if self.state != state {
            tracing::debug!("Drawer {} -> {}", self.state, state);
        }
        self.state = state;
    }

    /// Return to the initial state, as when the owning view is torn down
    pub fn reset(&mut self) {
        self.close();
    }

    /// Apply a finished drag and report what it was classified as
    pub fn handle_drag_end(&mut self, release: DragRelease) -> GestureDecision {
        let decision = classify(release, self.thresholds);
        match decision {
            GestureDecision::Expand => self.expand(),
            GestureDecision::Collapse => self.collapse(),
            GestureDecision::NoOp => {}
        }
        decision
    }
}
