//=========================================================================
// Game Events
//=========================================================================
//
// Closed set of events carried by the EventBus.
//
// Each `EventKind` names one channel; each `GameEvent` variant is the
// payload for exactly one kind:
//
// ```text
//   "poi-selected"     → PoiSelected(Option<Poi>)
//   "poi-hover-start"  → PoiHoverStart(Poi)
//   "poi-hover-end"    → PoiHoverEnd(Poi)
//   "poi-proximity"    → PoiProximity { poi, in_range }
//   "poi-interaction"  → PoiInteraction(PoiInteraction)
// ```
//
//=========================================================================

use std::fmt;
use std::str::FromStr;

use crate::core::poi::{Poi, PoiInteraction};

//=== EventKind ===========================================================

/// Event channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PoiSelected,
    PoiHoverStart,
    PoiHoverEnd,
    PoiProximity,
    PoiInteraction,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 5] = [
        EventKind::PoiSelected,
        EventKind::PoiHoverStart,
        EventKind::PoiHoverEnd,
        EventKind::PoiProximity,
        EventKind::PoiInteraction,
    ];

    /// Wire name of the channel.
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::PoiSelected => "poi-selected",
            EventKind::PoiHoverStart => "poi-hover-start",
            EventKind::PoiHoverEnd => "poi-hover-end",
            EventKind::PoiProximity => "poi-proximity",
            EventKind::PoiInteraction => "poi-interaction",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event name `{0}`")]
pub struct UnknownEventName(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownEventName(s.to_string()))
    }
}

//=== GameEvent ===========================================================

/// Event payload, tagged by channel.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A POI was selected, or the selection cleared (`None`).
    PoiSelected(Option<Poi>),

    /// The pointer started hovering a POI.
    PoiHoverStart(Poi),

    /// The pointer stopped hovering a POI.
    PoiHoverEnd(Poi),

    /// The player entered (`in_range`) or left a POI's radius.
    PoiProximity { poi: Poi, in_range: bool },

    /// The attendee interacted with a POI.
    PoiInteraction(PoiInteraction),
}

impl GameEvent {
    /// Channel this event is delivered on.
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::PoiSelected(_) => EventKind::PoiSelected,
            GameEvent::PoiHoverStart(_) => EventKind::PoiHoverStart,
            GameEvent::PoiHoverEnd(_) => EventKind::PoiHoverEnd,
            GameEvent::PoiProximity { .. } => EventKind::PoiProximity,
            GameEvent::PoiInteraction(_) => EventKind::PoiInteraction,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::poi::{InteractionKind, PoiKind};

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "poi-teleport".parse::<EventKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event name `poi-teleport`");
    }

    #[test]
    fn event_reports_its_kind() {
        let poi = Poi::new("b1", "Booth 1", PoiKind::Booth);
        assert_eq!(GameEvent::PoiSelected(None).kind(), EventKind::PoiSelected);
        assert_eq!(GameEvent::PoiHoverEnd(poi.clone()).kind(), EventKind::PoiHoverEnd);
        assert_eq!(
            GameEvent::PoiProximity { poi, in_range: true }.kind(),
            EventKind::PoiProximity
        );
        assert_eq!(
            GameEvent::PoiInteraction(PoiInteraction::new("b1", InteractionKind::Visited, 0)).kind(),
            EventKind::PoiInteraction
        );
    }

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(EventKind::PoiHoverStart.to_string(), "poi-hover-start");
    }
}
