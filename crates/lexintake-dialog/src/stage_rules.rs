//! Stage transition rules for the intake flow.
//!
//! Enforces the allowed stage transitions:
//! Greeting -> AwaitingName -> AwaitingRole -> AwaitingCategory ->
//! AwaitingDescription -> (AwaitingEmail -> AwaitingPhone ->)
//! AwaitingSlotChoice -> Confirmed -> Closed,
//! plus the explicit restart edge back to Greeting from any stage.

use lexintake_core::types::Stage;

use crate::error::DialogError;

/// Validate that a stage transition is allowed.
///
/// Valid transitions:
/// - any -> Greeting (restart)
/// - Greeting -> AwaitingName | AwaitingRole (flow variant)
/// - AwaitingName -> AwaitingRole
/// - AwaitingRole -> AwaitingCategory
/// - AwaitingCategory -> AwaitingDescription
/// - AwaitingDescription -> AwaitingEmail | AwaitingSlotChoice (flow variant)
/// - AwaitingEmail -> AwaitingPhone
/// - AwaitingPhone -> AwaitingSlotChoice
/// - AwaitingSlotChoice -> Confirmed
/// - Confirmed -> Closed
pub fn validate_transition(from: Stage, to: Stage) -> Result<(), DialogError> {
    let valid = matches!(
        (from, to),
        (_, Stage::Greeting)
            | (Stage::Greeting, Stage::AwaitingName)
            | (Stage::Greeting, Stage::AwaitingRole)
            | (Stage::AwaitingName, Stage::AwaitingRole)
            | (Stage::AwaitingRole, Stage::AwaitingCategory)
            | (Stage::AwaitingCategory, Stage::AwaitingDescription)
            | (Stage::AwaitingDescription, Stage::AwaitingEmail)
            | (Stage::AwaitingDescription, Stage::AwaitingSlotChoice)
            | (Stage::AwaitingEmail, Stage::AwaitingPhone)
            | (Stage::AwaitingPhone, Stage::AwaitingSlotChoice)
            | (Stage::AwaitingSlotChoice, Stage::Confirmed)
            | (Stage::Confirmed, Stage::Closed)
    );

    if valid {
        Ok(())
    } else {
        Err(DialogError::InvalidTransition(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STAGES: [Stage; 10] = [
        Stage::Greeting,
        Stage::AwaitingName,
        Stage::AwaitingRole,
        Stage::AwaitingCategory,
        Stage::AwaitingDescription,
        Stage::AwaitingEmail,
        Stage::AwaitingPhone,
        Stage::AwaitingSlotChoice,
        Stage::Confirmed,
        Stage::Closed,
    ];

    // =====================================================================
    // Valid transitions
    // =====================================================================

    #[test]
    fn test_forward_path_without_contact() {
        assert!(validate_transition(Stage::Greeting, Stage::AwaitingRole).is_ok());
        assert!(validate_transition(Stage::AwaitingRole, Stage::AwaitingCategory).is_ok());
        assert!(validate_transition(Stage::AwaitingCategory, Stage::AwaitingDescription).is_ok());
        assert!(
            validate_transition(Stage::AwaitingDescription, Stage::AwaitingSlotChoice).is_ok()
        );
        assert!(validate_transition(Stage::AwaitingSlotChoice, Stage::Confirmed).is_ok());
        assert!(validate_transition(Stage::Confirmed, Stage::Closed).is_ok());
    }

    #[test]
    fn test_forward_path_with_name_and_contact() {
        assert!(validate_transition(Stage::Greeting, Stage::AwaitingName).is_ok());
        assert!(validate_transition(Stage::AwaitingName, Stage::AwaitingRole).is_ok());
        assert!(validate_transition(Stage::AwaitingDescription, Stage::AwaitingEmail).is_ok());
        assert!(validate_transition(Stage::AwaitingEmail, Stage::AwaitingPhone).is_ok());
        assert!(validate_transition(Stage::AwaitingPhone, Stage::AwaitingSlotChoice).is_ok());
    }

    #[test]
    fn test_restart_allowed_from_every_stage() {
        for from in ALL_STAGES {
            assert!(
                validate_transition(from, Stage::Greeting).is_ok(),
                "restart from {:?} should be allowed",
                from
            );
        }
    }

    // =====================================================================
    // Invalid transitions
    // =====================================================================

    #[test]
    fn test_no_stage_skipping() {
        assert!(validate_transition(Stage::Greeting, Stage::AwaitingCategory).is_err());
        assert!(validate_transition(Stage::AwaitingRole, Stage::AwaitingDescription).is_err());
        assert!(validate_transition(Stage::AwaitingCategory, Stage::AwaitingSlotChoice).is_err());
        assert!(validate_transition(Stage::AwaitingEmail, Stage::AwaitingSlotChoice).is_err());
        assert!(validate_transition(Stage::Greeting, Stage::Confirmed).is_err());
    }

    #[test]
    fn test_no_backward_transitions_except_restart() {
        assert!(validate_transition(Stage::AwaitingCategory, Stage::AwaitingRole).is_err());
        assert!(validate_transition(Stage::Confirmed, Stage::AwaitingSlotChoice).is_err());
        assert!(validate_transition(Stage::AwaitingPhone, Stage::AwaitingEmail).is_err());
    }

    #[test]
    fn test_closed_has_no_outgoing_edges_except_restart() {
        for to in ALL_STAGES {
            let result = validate_transition(Stage::Closed, to);
            if to == Stage::Greeting {
                assert!(result.is_ok());
            } else {
                assert!(result.is_err(), "Closed -> {:?} should be invalid", to);
            }
        }
    }

    #[test]
    fn test_error_names_both_stages() {
        let err = validate_transition(Stage::Confirmed, Stage::AwaitingRole).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Confirmed"));
        assert!(msg.contains("AwaitingRole"));
    }

    #[test]
    fn test_all_valid_transitions_count() {
        // 10 restart edges (any -> Greeting) plus 11 forward edges.
        let mut valid_count = 0;
        for from in ALL_STAGES {
            for to in ALL_STAGES {
                if validate_transition(from, to).is_ok() {
                    valid_count += 1;
                }
            }
        }
        assert_eq!(valid_count, 21, "Expected exactly 21 valid transitions");
    }
}
