//! Static appointment slot catalogue.
//!
//! The firm publishes a fixed calendar of candidate slots; the dialogue
//! engine walks a cursor over it. There is no computed availability and no
//! conflict logic.

use serde::{Deserialize, Serialize};

/// Half of the day a slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Morning,
    Afternoon,
}

/// Index into [`CATALOG`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub usize);

/// A candidate appointment slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Day label shown to the caller, e.g. "Lunes 29 de Septiembre".
    pub day: &'static str,
    /// Time label shown to the caller, e.g. "10:30 de la mañana".
    pub time: &'static str,
    pub period: Period,
}

impl Slot {
    /// Full human-readable label, e.g. "Lunes 29 de Septiembre a las 10:30 de la mañana".
    pub fn label(&self) -> String {
        format!("{} a las {}", self.day, self.time)
    }
}

/// All published slots. Indexed by [`SlotId`].
pub const CATALOG: &[Slot] = &[
    Slot {
        day: "Lunes 29 de Septiembre",
        time: "10:30 de la mañana",
        period: Period::Morning,
    },
    Slot {
        day: "Miércoles 1 de Octubre",
        time: "3:30 de la tarde",
        period: Period::Afternoon,
    },
    Slot {
        day: "Lunes 29 de Septiembre",
        time: "3:30 de la tarde",
        period: Period::Afternoon,
    },
    Slot {
        day: "Miércoles 1 de Octubre",
        time: "4:15 de la tarde",
        period: Period::Afternoon,
    },
    Slot {
        day: "Viernes 3 de Octubre",
        time: "3:45 de la tarde",
        period: Period::Afternoon,
    },
];

/// Default proposal order: Monday morning first, then Wednesday afternoon.
const DEFAULT_TRACK: &[SlotId] = &[SlotId(0), SlotId(1)];

/// Afternoon-only proposal order, offered when the caller prefers the
/// afternoon.
const AFTERNOON_TRACK: &[SlotId] = &[SlotId(2), SlotId(3), SlotId(4)];

/// Look up a slot by id.
pub fn slot(id: SlotId) -> &'static Slot {
    &CATALOG[id.0]
}

/// Candidate list for the given period preference.
pub fn candidates(preferred: Option<Period>) -> &'static [SlotId] {
    match preferred {
        Some(Period::Afternoon) => AFTERNOON_TRACK,
        _ => DEFAULT_TRACK,
    }
}

/// First candidate for the given period preference.
pub fn first_candidate(preferred: Option<Period>) -> SlotId {
    candidates(preferred)[0]
}

/// Candidate after `current` in the active track, wrapping back to the
/// start once the list is exhausted. If `current` is not on the active
/// track (the caller just switched preference), the first candidate is
/// returned.
pub fn next_candidate(current: SlotId, preferred: Option<Period>) -> SlotId {
    let track = candidates(preferred);
    match track.iter().position(|&id| id == current) {
        Some(pos) => track[(pos + 1) % track.len()],
        None => track[0],
    }
}

/// Resolve an explicit day/time token in the lower-cased message to a slot.
///
/// Time tokens are checked before day tokens: "lunes a las 3:30" names the
/// afternoon Monday slot, not the morning one. Bare day names resolve
/// against the caller's period preference.
pub fn resolve_token(lowered: &str, preferred: Option<Period>) -> Option<SlotId> {
    if lowered.contains("10:30") {
        return Some(SlotId(0));
    }
    if lowered.contains("4:15") {
        return Some(SlotId(3));
    }
    if lowered.contains("3:45") {
        return Some(SlotId(4));
    }
    if lowered.contains("3:30") {
        return Some(match (lowered.contains("lunes"), preferred) {
            (true, _) | (false, Some(Period::Afternoon)) => SlotId(2),
            _ => SlotId(1),
        });
    }
    if lowered.contains("lunes") {
        return Some(match preferred {
            Some(Period::Afternoon) => SlotId(2),
            _ => SlotId(0),
        });
    }
    if lowered.contains("miércoles") || lowered.contains("miercoles") {
        return Some(match preferred {
            Some(Period::Afternoon) => SlotId(3),
            _ => SlotId(1),
        });
    }
    if lowered.contains("viernes") {
        return Some(SlotId(4));
    }
    None
}
