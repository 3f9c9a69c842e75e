//! Annotation drawer
//!
//! The bottom sheet that shows an annotation over the scan. It is either
//! closed, collapsed to a peek height, or expanded, and drag gestures move
//! it between collapsed and expanded. Rendering reads [`Drawer::height`];
//! nothing here animates.

mod gesture;
mod state;

pub use gesture::{classify, DragRelease, GestureDecision, GestureThresholds};
pub use state::{Drawer, DrawerHeight, DrawerHeights, DrawerState, UnknownDrawerState};
