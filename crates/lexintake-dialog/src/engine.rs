//! The dialogue engine: maps (session, message) to a reply.
//!
//! A state machine keyed jointly by the session's stage and the classified
//! intent. The same intent produces different replies and transitions
//! depending on which fields are already filled. The engine mutates the
//! session it is given and returns the outgoing text; it never performs I/O
//! and never talks to the narration or transport layers.

use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;
use tracing::debug;

use lexintake_core::config::{ContactValidation, DialogConfig};
use lexintake_core::slots::{self, Period, SlotId};
use lexintake_core::types::{CaseCategory, Role, Session, Stage};

use crate::intent::{Classification, Classifier, Intent};
use crate::prompts;
use crate::stage_rules;

/// Engine output for one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Signals the transport that the conversation is over.
    pub end_call: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_call: false,
        }
    }

    fn hang_up(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_call: true,
        }
    }
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^@\s]+@[^@\s]+\.[^@\s]+").expect("Invalid email regex"));

static DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("Invalid digit regex"));

/// The dialogue state machine.
pub struct DialogEngine {
    classifier: Classifier,
    config: DialogConfig,
}

impl DialogEngine {
    pub fn new(config: DialogConfig) -> Self {
        let classifier = Classifier::new(config.description_min_chars);
        Self { classifier, config }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Advance the session with one caller message.
    ///
    /// Every non-empty message yields a reply; a classification miss is not
    /// an error. The caller must reject empty messages before invoking this.
    pub fn advance(&self, session: &mut Session, text: &str) -> Reply {
        let classification = self.classifier.classify_message(text);
        debug!(
            session_id = %session.id,
            stage = ?session.stage,
            classification = ?classification,
            "advancing session"
        );

        // Restart wins over everything, including a closed session: the
        // caller explicitly asks for a fresh lifetime.
        if classification == Classification::Recognized(Intent::RestartRequest) {
            session.restart();
            return Reply::say(prompts::RESTARTED);
        }

        // A closed session still answers, but its fields are frozen.
        if session.stage.is_terminal() {
            return Reply::say(prompts::CLOSED_ALREADY);
        }

        session.turn_count += 1;
        session.last_message_at = Local::now().timestamp();

        // Stage-independent intents. None of these change the stage.
        if let Classification::Recognized(intent) = classification {
            match intent {
                Intent::InterruptingLegalTopic => {
                    return Reply::say(prompts::INTERRUPTING_DEFERRAL)
                }
                Intent::RepeatRequest => {
                    return Reply::say(prompts::repeat_prompt(session, self.config.collect_name))
                }
                Intent::TopicRole => return Reply::say(prompts::INFO_ROLE),
                Intent::TopicCategories => return Reply::say(prompts::INFO_CATEGORIES),
                Intent::TopicSchedule => return Reply::say(prompts::INFO_SCHEDULE),
                _ => {}
            }
        }

        match session.stage {
            Stage::Greeting => self.enter_flow(session),
            Stage::AwaitingName => self.take_name(session, text, classification),
            Stage::AwaitingRole => self.take_role(session, classification),
            Stage::AwaitingCategory => self.take_category(session, classification),
            Stage::AwaitingDescription => self.take_description(session, text, classification),
            Stage::AwaitingEmail => self.take_email(session, text),
            Stage::AwaitingPhone => self.take_phone(session, text),
            Stage::AwaitingSlotChoice => self.take_slot_choice(session, text, classification),
            Stage::Confirmed => self.take_final_remark(session, classification),
            Stage::Closed => Reply::say(prompts::CLOSED_ALREADY),
        }
    }

    // -----------------------------------------------------------------
    // Stage handlers
    // -----------------------------------------------------------------

    /// First contact: welcome the caller and ask the first question.
    fn enter_flow(&self, session: &mut Session) -> Reply {
        let next = if self.config.collect_name {
            Stage::AwaitingName
        } else {
            Stage::AwaitingRole
        };
        self.transition(session, next);
        Reply::say(prompts::welcome(self.config.collect_name))
    }

    fn take_name(
        &self,
        session: &mut Session,
        text: &str,
        classification: Classification,
    ) -> Reply {
        // Anything that matched a keyword is an answer to some other
        // question, not a name.
        if let Classification::Recognized(_) = classification {
            return self.guidance(session);
        }
        let name = text.trim().to_string();
        let reply = prompts::ask_role_with_name(&name);
        session.name = Some(name);
        self.transition(session, Stage::AwaitingRole);
        Reply::say(reply)
    }

    fn take_role(&self, session: &mut Session, classification: Classification) -> Reply {
        let role = match classification {
            Classification::Recognized(Intent::RoleVictim) => Role::Victim,
            Classification::Recognized(Intent::RolePlaintiff) => Role::Plaintiff,
            _ => return self.guidance(session),
        };
        session.role = Some(role);
        self.transition(session, Stage::AwaitingCategory);
        Reply::say(prompts::category_prompt(role))
    }

    fn take_category(&self, session: &mut Session, classification: Classification) -> Reply {
        let category = match classification {
            Classification::Recognized(Intent::CategoryCivil) => CaseCategory::Civil,
            Classification::Recognized(Intent::CategoryLabor) => CaseCategory::Labor,
            Classification::Recognized(Intent::CategoryCriminal) => CaseCategory::Criminal,
            Classification::Recognized(Intent::CategoryUnknown) => CaseCategory::Unspecified,
            _ => return self.guidance(session),
        };
        session.category = Some(category);
        self.transition(session, Stage::AwaitingDescription);
        Reply::say(prompts::describe_prompt(category))
    }

    fn take_description(
        &self,
        session: &mut Session,
        text: &str,
        classification: Classification,
    ) -> Reply {
        if classification != Classification::Description {
            return self.guidance(session);
        }
        session.description = Some(text.trim().to_string());

        if self.config.collect_contact {
            self.transition(session, Stage::AwaitingEmail);
            Reply::say(prompts::ASK_EMAIL)
        } else {
            self.propose_first_slot(session)
        }
    }

    fn take_email(&self, session: &mut Session, text: &str) -> Reply {
        if !self.email_is_valid(text) {
            return Reply::say(prompts::EMAIL_INVALID);
        }
        session.email = Some(text.trim().to_string());
        self.transition(session, Stage::AwaitingPhone);
        Reply::say(prompts::ASK_PHONE)
    }

    fn take_phone(&self, session: &mut Session, text: &str) -> Reply {
        if !self.phone_is_valid(text) {
            return Reply::say(prompts::PHONE_INVALID);
        }
        session.phone = Some(text.trim().to_string());
        self.propose_first_slot(session)
    }

    fn take_slot_choice(
        &self,
        session: &mut Session,
        text: &str,
        classification: Classification,
    ) -> Reply {
        let proposed = session
            .proposed_slot
            .unwrap_or_else(|| slots::first_candidate(session.preferred_period));

        match classification {
            Classification::Recognized(Intent::Affirmative) => self.confirm(session, proposed),
            Classification::Recognized(Intent::Negative) => {
                let next = slots::next_candidate(proposed, session.preferred_period);
                session.proposed_slot = Some(next);
                Reply::say(prompts::next_proposal(next))
            }
            Classification::Recognized(Intent::PrefersAfternoon) => {
                session.preferred_period = Some(Period::Afternoon);
                session.proposed_slot = Some(slots::first_candidate(Some(Period::Afternoon)));
                Reply::say(prompts::afternoon_list())
            }
            Classification::Recognized(Intent::SlotChoice) => {
                let chosen = slots::resolve_token(&text.to_lowercase(), session.preferred_period)
                    .unwrap_or(proposed);
                self.confirm(session, chosen)
            }
            _ => self.guidance(session),
        }
    }

    fn take_final_remark(&self, session: &mut Session, classification: Classification) -> Reply {
        match classification {
            Classification::Recognized(Intent::Negative)
            | Classification::Recognized(Intent::Closing) => {
                self.transition(session, Stage::Closed);
                Reply::hang_up(prompts::CLOSING)
            }
            _ => Reply::say(prompts::CONFIRMED_ACK),
        }
    }

    // -----------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------

    fn propose_first_slot(&self, session: &mut Session) -> Reply {
        let slot = slots::first_candidate(session.preferred_period);
        session.proposed_slot = Some(slot);
        self.transition(session, Stage::AwaitingSlotChoice);
        Reply::say(prompts::first_proposal(slot))
    }

    fn confirm(&self, session: &mut Session, slot: SlotId) -> Reply {
        session.proposed_slot = Some(slot);
        if session.confirmed_slot.is_none() {
            session.confirmed_slot = Some(slot);
        }
        self.transition(session, Stage::Confirmed);
        Reply::say(prompts::confirmation(session))
    }

    fn guidance(&self, session: &Session) -> Reply {
        Reply::say(prompts::guidance(session.stage, session.turn_count))
    }

    fn transition(&self, session: &mut Session, to: Stage) {
        debug_assert!(
            stage_rules::validate_transition(session.stage, to).is_ok(),
            "illegal transition {:?} -> {:?}",
            session.stage,
            to
        );
        session.stage = to;
    }

    fn email_is_valid(&self, text: &str) -> bool {
        match self.config.contact_validation {
            ContactValidation::Permissive => !text.trim().is_empty(),
            ContactValidation::Strict => EMAIL_RE.is_match(text),
        }
    }

    fn phone_is_valid(&self, text: &str) -> bool {
        match self.config.contact_validation {
            ContactValidation::Permissive => !text.trim().is_empty(),
            ContactValidation::Strict => DIGIT_RE.find_iter(text).count() >= 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const DESCRIPTION: &str = "Mi arrendador retiene el depósito desde marzo";

    fn engine() -> DialogEngine {
        DialogEngine::new(DialogConfig::default())
    }

    fn engine_with(config: DialogConfig) -> DialogEngine {
        DialogEngine::new(config)
    }

    fn session() -> Session {
        Session::new(Uuid::new_v4())
    }

    /// Drive a fresh session through the default flow up to the slot
    /// proposal.
    fn session_at_slot_choice(engine: &DialogEngine) -> Session {
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "soy víctima");
        engine.advance(&mut s, "civil");
        engine.advance(&mut s, DESCRIPTION);
        engine.advance(&mut s, "ana@ejemplo.com");
        engine.advance(&mut s, "601 555 0147");
        assert_eq!(s.stage, Stage::AwaitingSlotChoice);
        s
    }

    // =====================================================================
    // Flow entry
    // =====================================================================

    #[test]
    fn test_scenario_a_greeting_asks_role() {
        let engine = engine();
        let mut s = session();
        let reply = engine.advance(&mut s, "Hola");
        assert!(reply.text.contains("víctima o demandante"));
        assert_eq!(s.stage, Stage::AwaitingRole);
        assert!(!reply.end_call);
    }

    #[test]
    fn test_greeting_advances_on_any_text() {
        // A fresh session has not been welcomed yet; the first message
        // always triggers the welcome regardless of content.
        let engine = engine();
        let mut s = session();
        let reply = engine.advance(&mut s, "quiero una cita");
        assert!(reply.text.contains("Bienvenido"));
        assert_eq!(s.stage, Stage::AwaitingRole);
    }

    #[test]
    fn test_name_variant_asks_name_first() {
        let engine = engine_with(DialogConfig {
            collect_name: true,
            ..DialogConfig::default()
        });
        let mut s = session();
        let reply = engine.advance(&mut s, "hola");
        assert!(reply.text.contains("nombre"));
        assert_eq!(s.stage, Stage::AwaitingName);

        let reply = engine.advance(&mut s, "Carmen Ruiz");
        assert_eq!(s.name.as_deref(), Some("Carmen Ruiz"));
        assert_eq!(s.stage, Stage::AwaitingRole);
        assert!(reply.text.contains("Carmen Ruiz"));
        assert!(reply.text.contains("víctima o demandante"));
    }

    #[test]
    fn test_name_stage_rejects_keyword_answers() {
        let engine = engine_with(DialogConfig {
            collect_name: true,
            ..DialogConfig::default()
        });
        let mut s = session();
        engine.advance(&mut s, "hola");
        let reply = engine.advance(&mut s, "hola");
        assert!(s.name.is_none());
        assert_eq!(s.stage, Stage::AwaitingName);
        assert!(reply.text.contains("su nombre"));
    }

    // =====================================================================
    // Role and category
    // =====================================================================

    #[test]
    fn test_scenario_b_victim_role() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        let reply = engine.advance(&mut s, "soy víctima");
        assert_eq!(s.role, Some(Role::Victim));
        assert_eq!(s.stage, Stage::AwaitingCategory);
        assert!(reply.text.contains("Civil"));
        assert!(reply.text.contains("Laboral"));
        assert!(reply.text.contains("Penal"));
    }

    #[test]
    fn test_plaintiff_examples_differ() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        let reply = engine.advance(&mut s, "soy demandante");
        assert_eq!(s.role, Some(Role::Plaintiff));
        assert!(reply.text.contains("divorcio"));
    }

    #[test]
    fn test_category_stored_with_tailored_prompt() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "victima");
        let reply = engine.advance(&mut s, "laboral");
        assert_eq!(s.category, Some(CaseCategory::Labor));
        assert_eq!(s.stage, Stage::AwaitingDescription);
        assert!(reply.text.contains("trabajo o empleador"));
    }

    #[test]
    fn test_category_unknown_maps_to_unspecified() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        let reply = engine.advance(&mut s, "no sé");
        assert_eq!(s.category, Some(CaseCategory::Unspecified));
        assert_eq!(s.stage, Stage::AwaitingDescription);
        assert!(reply.text.contains("No hay problema"));
    }

    #[test]
    fn test_unrecognized_role_answer_names_missing_field() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        let reply = engine.advance(&mut s, "pues");
        assert_eq!(s.stage, Stage::AwaitingRole);
        assert!(s.role.is_none());
        assert!(reply.text.contains("víctima o demandante"));
    }

    // =====================================================================
    // Description and contact collection
    // =====================================================================

    #[test]
    fn test_short_description_is_not_stored() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        engine.advance(&mut s, "civil");
        engine.advance(&mut s, "mal");
        assert!(s.description.is_none());
        assert_eq!(s.stage, Stage::AwaitingDescription);
    }

    #[test]
    fn test_description_leads_to_email() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        engine.advance(&mut s, "civil");
        let reply = engine.advance(&mut s, DESCRIPTION);
        assert_eq!(s.description.as_deref(), Some(DESCRIPTION));
        assert_eq!(s.stage, Stage::AwaitingEmail);
        assert!(reply.text.contains("correo electrónico"));
    }

    #[test]
    fn test_description_without_contact_leads_to_proposal() {
        let engine = engine_with(DialogConfig {
            collect_contact: false,
            ..DialogConfig::default()
        });
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        engine.advance(&mut s, "civil");
        let reply = engine.advance(&mut s, DESCRIPTION);
        assert_eq!(s.stage, Stage::AwaitingSlotChoice);
        assert_eq!(s.proposed_slot, Some(SlotId(0)));
        assert!(reply.text.contains("Lunes 29 de Septiembre"));
        assert!(reply.text.contains("no hay costo inicial"));
    }

    #[test]
    fn test_strict_email_validation() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        engine.advance(&mut s, "civil");
        engine.advance(&mut s, DESCRIPTION);

        let reply = engine.advance(&mut s, "carezco de ese dato");
        assert!(s.email.is_none());
        assert_eq!(s.stage, Stage::AwaitingEmail);
        assert!(reply.text.contains("no parece válido"));

        let reply = engine.advance(&mut s, "ana@ejemplo.com");
        assert_eq!(s.email.as_deref(), Some("ana@ejemplo.com"));
        assert_eq!(s.stage, Stage::AwaitingPhone);
        assert!(reply.text.contains("teléfono"));
    }

    #[test]
    fn test_strict_phone_validation() {
        let engine = engine();
        let mut s = session_at_phone(&engine);

        let reply = engine.advance(&mut s, "el 12 34");
        assert!(s.phone.is_none());
        assert!(reply.text.contains("7 dígitos"));

        engine.advance(&mut s, "601 555 0147");
        assert_eq!(s.phone.as_deref(), Some("601 555 0147"));
        assert_eq!(s.stage, Stage::AwaitingSlotChoice);
    }

    fn session_at_phone(engine: &DialogEngine) -> Session {
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        engine.advance(&mut s, "civil");
        engine.advance(&mut s, DESCRIPTION);
        engine.advance(&mut s, "ana@ejemplo.com");
        assert_eq!(s.stage, Stage::AwaitingPhone);
        s
    }

    #[test]
    fn test_permissive_validation_accepts_anything() {
        let engine = engine_with(DialogConfig {
            contact_validation: ContactValidation::Permissive,
            ..DialogConfig::default()
        });
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        engine.advance(&mut s, "civil");
        engine.advance(&mut s, DESCRIPTION);
        engine.advance(&mut s, "el del trabajo");
        assert_eq!(s.email.as_deref(), Some("el del trabajo"));
        engine.advance(&mut s, "el fijo de casa");
        assert_eq!(s.phone.as_deref(), Some("el fijo de casa"));
        assert_eq!(s.stage, Stage::AwaitingSlotChoice);
    }

    // =====================================================================
    // Scheduling
    // =====================================================================

    #[test]
    fn test_scenario_c_rejection_advances_proposal() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        assert_eq!(s.proposed_slot, Some(SlotId(0)));

        let reply = engine.advance(&mut s, "no");
        assert_eq!(s.proposed_slot, Some(SlotId(1)));
        assert_eq!(s.stage, Stage::AwaitingSlotChoice);
        assert!(reply.text.contains("Miércoles 1 de Octubre"));
        assert!(reply.text.contains("3:30 de la tarde"));
    }

    #[test]
    fn test_scenario_d_affirmative_confirms_with_contact_echo() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);

        let reply = engine.advance(&mut s, "sí");
        assert_eq!(s.confirmed_slot, Some(SlotId(0)));
        assert_eq!(s.stage, Stage::Confirmed);
        assert!(!reply.end_call);
        assert!(reply.text.contains("Cita confirmada"));
        assert!(reply.text.contains("ana@ejemplo.com"));
        assert!(reply.text.contains("601 555 0147"));
    }

    #[test]
    fn test_prefers_afternoon_switches_track() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);

        let reply = engine.advance(&mut s, "mejor tarde");
        assert_eq!(s.preferred_period, Some(Period::Afternoon));
        assert_eq!(s.proposed_slot, Some(SlotId(2)));
        assert_eq!(s.stage, Stage::AwaitingSlotChoice);
        assert!(reply.text.contains("Horarios de tarde"));
        assert_eq!(reply.text.matches("- ").count(), 3);
    }

    #[test]
    fn test_rejections_walk_the_afternoon_track() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        engine.advance(&mut s, "mejor tarde");
        engine.advance(&mut s, "no");
        assert_eq!(s.proposed_slot, Some(SlotId(3)));
        engine.advance(&mut s, "no");
        assert_eq!(s.proposed_slot, Some(SlotId(4)));
        // Exhausted: wraps back to the first afternoon slot.
        engine.advance(&mut s, "no");
        assert_eq!(s.proposed_slot, Some(SlotId(2)));
    }

    #[test]
    fn test_explicit_day_token_confirms() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);

        let reply = engine.advance(&mut s, "el viernes");
        assert_eq!(s.confirmed_slot, Some(SlotId(4)));
        assert_eq!(s.stage, Stage::Confirmed);
        assert!(reply.text.contains("Viernes 3 de Octubre"));
    }

    #[test]
    fn test_time_token_confirms_named_slot() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        engine.advance(&mut s, "no");
        assert_eq!(s.proposed_slot, Some(SlotId(1)));

        // An explicit time picks that slot even when another one is on the
        // table.
        let reply = engine.advance(&mut s, "el de las 10:30");
        assert_eq!(s.confirmed_slot, Some(SlotId(0)));
        assert!(reply.text.contains("10:30"));
    }

    // =====================================================================
    // Confirmation and closing
    // =====================================================================

    #[test]
    fn test_scenario_e_negative_after_confirmation_closes() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        engine.advance(&mut s, "sí");

        let reply = engine.advance(&mut s, "no");
        assert_eq!(s.stage, Stage::Closed);
        assert!(reply.end_call);
        assert!(reply.text.contains("excelente día"));
    }

    #[test]
    fn test_thanks_after_confirmation_closes() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        engine.advance(&mut s, "sí");

        let reply = engine.advance(&mut s, "gracias");
        assert_eq!(s.stage, Stage::Closed);
        assert!(reply.end_call);
    }

    #[test]
    fn test_remark_after_confirmation_is_acknowledged() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        engine.advance(&mut s, "sí");
        let description_before = s.description.clone();

        let reply = engine.advance(&mut s, "llevaré los papeles del contrato ese día");
        assert_eq!(s.stage, Stage::Confirmed);
        assert!(!reply.end_call);
        assert_eq!(s.description, description_before);
        assert!(reply.text.contains("¿Necesita algo más?"));
    }

    #[test]
    fn test_closed_session_is_frozen() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        engine.advance(&mut s, "sí");
        engine.advance(&mut s, "no");
        assert_eq!(s.stage, Stage::Closed);

        let snapshot = s.clone();
        let reply = engine.advance(&mut s, "hola");
        assert_eq!(s.stage, Stage::Closed);
        assert!(!reply.end_call);
        assert_eq!(s.email, snapshot.email);
        assert_eq!(s.confirmed_slot, snapshot.confirmed_slot);
        assert_eq!(s.turn_count, snapshot.turn_count);
    }

    // =====================================================================
    // Global rules
    // =====================================================================

    #[test]
    fn test_restart_clears_fields_from_any_stage() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        assert!(s.role.is_some());

        let reply = engine.advance(&mut s, "quiero empezar de nuevo");
        assert_eq!(s.stage, Stage::Greeting);
        assert!(s.role.is_none());
        assert!(s.category.is_none());
        assert!(s.description.is_none());
        assert!(s.email.is_none());
        assert!(s.phone.is_none());
        assert!(s.proposed_slot.is_none());
        assert_eq!(s.turn_count, 0);
        assert!(reply.text.contains("reiniciado"));
    }

    #[test]
    fn test_restart_idempotent_across_stages() {
        let engine = engine();
        let id = Uuid::new_v4();
        let scripts: [&[&str]; 4] = [
            &[],
            &["hola"],
            &["hola", "víctima"],
            &["hola", "víctima", "penal", DESCRIPTION],
        ];
        for script in scripts {
            let mut s = Session::new(id);
            for msg in script {
                engine.advance(&mut s, msg);
            }
            engine.advance(&mut s, "reiniciar");
            assert_eq!(s.stage, Stage::Greeting);
            assert!(s.role.is_none());
            assert!(s.description.is_none());
        }
    }

    #[test]
    fn test_restart_works_even_when_closed() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        engine.advance(&mut s, "sí");
        engine.advance(&mut s, "no");
        assert_eq!(s.stage, Stage::Closed);

        engine.advance(&mut s, "reiniciar");
        assert_eq!(s.stage, Stage::Greeting);
        assert!(s.confirmed_slot.is_none());
    }

    #[test]
    fn test_repeat_is_idempotent() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        let snapshot_stage = s.stage;

        let first = engine.advance(&mut s, "repetir");
        let second = engine.advance(&mut s, "no entendí");
        assert_eq!(first.text, second.text);
        assert_eq!(s.stage, snapshot_stage);
        assert!(s.role.is_none());
    }

    #[test]
    fn test_interrupting_topic_defers_without_stage_change() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");

        let reply = engine.advance(&mut s, "es que tengo un divorcio pendiente");
        assert_eq!(s.stage, Stage::AwaitingCategory);
        assert!(s.category.is_none());
        assert!(reply.text.contains("completar su registro"));
    }

    #[test]
    fn test_topic_blocks_do_not_change_stage() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");

        let reply = engine.advance(&mut s, "¿cuáles son las opciones de rol?");
        assert_eq!(reply.text, prompts::INFO_ROLE);
        assert_eq!(s.stage, Stage::AwaitingRole);

        let reply = engine.advance(&mut s, "¿qué tipos de caso hay?");
        assert_eq!(reply.text, prompts::INFO_CATEGORIES);
        assert_eq!(s.stage, Stage::AwaitingRole);

        let reply = engine.advance(&mut s, "¿qué horarios tienen?");
        assert_eq!(reply.text, prompts::INFO_SCHEDULE);
        assert_eq!(s.stage, Stage::AwaitingRole);
    }

    #[test]
    fn test_fields_never_overwritten_without_restart() {
        let engine = engine();
        let mut s = session_at_slot_choice(&engine);
        let role_before = s.role;
        let category_before = s.category;
        let email_before = s.email.clone();

        // Late answers to earlier questions fall through to guidance and
        // must not touch the stored fields.
        engine.advance(&mut s, "soy demandante");
        engine.advance(&mut s, "penal");
        assert_eq!(s.role, role_before);
        assert_eq!(s.category, category_before);
        assert_eq!(s.email, email_before);
        assert_eq!(s.stage, Stage::AwaitingSlotChoice);
    }

    #[test]
    fn test_guidance_rotates_between_turns() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        let first = engine.advance(&mut s, "pues");
        let second = engine.advance(&mut s, "pues");
        assert_ne!(first.text, second.text);
        assert!(first.text.contains("víctima o demandante"));
        assert!(second.text.contains("víctima o demandante"));
    }

    #[test]
    fn test_turn_count_increments_per_message() {
        let engine = engine();
        let mut s = session();
        engine.advance(&mut s, "hola");
        engine.advance(&mut s, "víctima");
        engine.advance(&mut s, "civil");
        assert_eq!(s.turn_count, 3);
    }
}
