pub mod config;
pub mod error;
pub mod slots;
pub mod types;

pub use config::{ContactValidation, DialogConfig, IntakeConfig};
pub use error::{IntakeError, Result};
pub use slots::{Period, Slot, SlotId};
pub use types::{CaseCategory, Role, Session, Stage};
