//! Input events delivered to a capture surface.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::CaptureResult;

/// Everything the host input layer can tell a surface.
///
/// Pointer coordinates are relative to the window; the surface translates
/// them by its container's offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Primary button pressed.
    PointerDown {
        /// X coordinate in window space.
        x: f32,
        /// Y coordinate in window space.
        y: f32,
    },
    /// Pointer moved.
    PointerMove {
        /// X coordinate in window space.
        x: f32,
        /// Y coordinate in window space.
        y: f32,
    },
    /// Primary button released.
    PointerUp,
    /// Pointer left the surface.
    PointerLeave,
    /// Container layout changed.
    Resize,
    /// Host "clear" control activated.
    Clear,
}

/// A source of surface events, injected so capture logic runs without a display.
pub trait InputSource {
    /// Next pending event, or `None` once drained.
    fn next_event(&mut self) -> Option<SurfaceEvent>;
}

/// A pre-recorded event sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptedInput {
    events: VecDeque<SurfaceEvent>,
}

impl ScriptedInput {
    /// Create a source replaying `events` in order.
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = SurfaceEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parse a JSON array of events.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a list of events.
    pub fn from_json_str(json: &str) -> CaptureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append an event.
    pub fn push(&mut self, event: SurfaceEvent) {
        self.events.push_back(event);
    }

    /// Number of events not yet delivered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> Option<SurfaceEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_use_snake_case_tags() {
        let json = serde_json::to_string(&SurfaceEvent::PointerDown { x: 1.0, y: 2.0 })
            .expect("serialize");
        assert_eq!(json, r#"{"type":"pointer_down","x":1.0,"y":2.0}"#);

        let leave: SurfaceEvent =
            serde_json::from_str(r#"{"type":"pointer_leave"}"#).expect("deserialize");
        assert_eq!(leave, SurfaceEvent::PointerLeave);
    }

    #[test]
    fn scripted_input_replays_in_order() {
        let mut input = ScriptedInput::from_json_str(
            r#"[{"type":"pointer_down","x":0,"y":0},{"type":"pointer_move","x":4,"y":0},{"type":"pointer_up"}]"#,
        )
        .expect("valid script");

        assert_eq!(input.remaining(), 3);
        assert_eq!(
            input.next_event(),
            Some(SurfaceEvent::PointerDown { x: 0.0, y: 0.0 })
        );
        assert_eq!(
            input.next_event(),
            Some(SurfaceEvent::PointerMove { x: 4.0, y: 0.0 })
        );
        assert_eq!(input.next_event(), Some(SurfaceEvent::PointerUp));
        assert_eq!(input.next_event(), None);
    }

    #[test]
    fn rejects_unknown_event_type() {
        assert!(ScriptedInput::from_json_str(r#"[{"type":"pinch"}]"#).is_err());
    }
}
