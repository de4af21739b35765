use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slots::{Period, SlotId};

// =============================================================================
// Enums
// =============================================================================

/// Position of a session in the intake flow.
///
/// Stages only advance forward through the flow, except for the explicit
/// restart transition back to [`Stage::Greeting`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Session created, welcome not yet delivered.
    Greeting,
    /// Waiting for the caller's name (name-collecting flow variant only).
    AwaitingName,
    /// Waiting for the caller's role in the case.
    AwaitingRole,
    /// Waiting for the case category.
    AwaitingCategory,
    /// Waiting for a free-text description of the case.
    AwaitingDescription,
    /// Waiting for a contact email (contact-collecting flow variant only).
    AwaitingEmail,
    /// Waiting for a contact phone (contact-collecting flow variant only).
    AwaitingPhone,
    /// A slot has been proposed; waiting for acceptance or rejection.
    AwaitingSlotChoice,
    /// Appointment confirmed; accepting final remarks.
    Confirmed,
    /// Conversation over. Collected fields are frozen.
    Closed,
}

impl Stage {
    /// Whether the session accepts no further state-changing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Closed)
    }
}

/// The caller's position in the case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Suffered a harm (accident, owed money).
    Victim,
    /// Initiates a claim against someone else.
    Plaintiff,
}

impl Role {
    /// Label used in responses.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Victim => "víctima",
            Role::Plaintiff => "demandante",
        }
    }
}

/// Legal category of the case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseCategory {
    /// Family, contracts, property.
    Civil,
    /// Employment disputes.
    Labor,
    /// Criminal matters.
    Criminal,
    /// The caller does not know the category yet.
    Unspecified,
}

impl CaseCategory {
    /// Label used in responses.
    pub fn display_name(&self) -> &'static str {
        match self {
            CaseCategory::Civil => "civil",
            CaseCategory::Labor => "laboral",
            CaseCategory::Criminal => "penal",
            CaseCategory::Unspecified => "por determinar",
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Accumulated state of one ongoing conversation.
///
/// One record per caller, owned by the session store. The dialogue engine
/// mutates it in place; it never creates or destroys sessions. Once a field
/// is collected it is never overwritten except by [`Session::restart`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Opaque key chosen by the session store.
    pub id: Uuid,
    pub stage: Stage,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub category: Option<CaseCategory>,
    pub description: Option<String>,
    /// Slot currently offered to the caller.
    pub proposed_slot: Option<SlotId>,
    /// Slot the caller accepted. Set at most once per session lifetime.
    pub confirmed_slot: Option<SlotId>,
    /// Set when the caller asks for afternoon slots.
    pub preferred_period: Option<Period>,
    /// Messages seen this lifetime. Used only to rotate default guidance.
    pub turn_count: u32,
    /// Epoch seconds.
    pub started_at: i64,
    /// Epoch seconds; drives the store's expiry sweep.
    pub last_message_at: i64,
}

impl Session {
    /// Create a fresh session at the greeting stage.
    pub fn new(id: Uuid) -> Self {
        let now = Local::now().timestamp();
        Self {
            id,
            stage: Stage::Greeting,
            name: None,
            email: None,
            phone: None,
            role: None,
            category: None,
            description: None,
            proposed_slot: None,
            confirmed_slot: None,
            preferred_period: None,
            turn_count: 0,
            started_at: now,
            last_message_at: now,
        }
    }

    /// Clear every collected field and return to the greeting stage,
    /// preserving only the id. A restarted session begins a fresh lifetime.
    pub fn restart(&mut self) {
        *self = Session::new(self.id);
    }
}
