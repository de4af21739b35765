//! Response catalogue for the intake flow.
//!
//! Every caller-facing text lives here, in Spanish. Responses are fixed
//! strings or small compositions over the session; nothing here mutates
//! state.

use lexintake_core::slots::{self, Period, SlotId};
use lexintake_core::types::{CaseCategory, Role, Session, Stage};

// =============================================================================
// Flow entry
// =============================================================================

pub const WELCOME_ROLE: &str = "¡Bienvenido a TusAbogados.com! Para orientarle mejor, necesito saber su rol en el caso.\n\nPor ejemplo:\n- Si sufrió un accidente o le deben dinero, sería \"víctima\"\n- Si quiere demandar a alguien por incumplimiento, sería \"demandante\"\n\n¿Cuál es su situación: víctima o demandante?";

pub const WELCOME_NAME: &str = "¡Bienvenido a TusAbogados.com! Para darle una atención personalizada, ¿me indica su nombre, por favor?";

pub const RESTARTED: &str = "De acuerdo, hemos reiniciado su registro. Salúdeme cuando quiera comenzar de nuevo.";

/// Welcome for the configured flow variant.
pub fn welcome(collect_name: bool) -> &'static str {
    if collect_name {
        WELCOME_NAME
    } else {
        WELCOME_ROLE
    }
}

/// Role question after the caller gave their name.
pub fn ask_role_with_name(name: &str) -> String {
    format!(
        "Gracias, {}. Para orientarle mejor, necesito saber su rol en el caso.\n\nPor ejemplo:\n- Si sufrió un accidente o le deben dinero, sería \"víctima\"\n- Si quiere demandar a alguien por incumplimiento, sería \"demandante\"\n\n¿Cuál es su situación: víctima o demandante?",
        name
    )
}

// =============================================================================
// Role and category
// =============================================================================

/// Category question with examples tailored to the caller's role.
pub fn category_prompt(role: Role) -> &'static str {
    match role {
        Role::Victim => "Entiendo que es víctima. Ahora necesito saber el tipo de caso.\n\nPor ejemplo:\n- \"Civil\": problemas familiares, contratos, propiedades\n- \"Laboral\": despido, acoso, derechos laborales\n- \"Penal\": robos, agresiones, estafas\n- \"No sé cuál es mi categoría\": si no está seguro\n\n¿En qué categoría está su caso?",
        Role::Plaintiff => "Entiendo que es demandante. Ahora necesito saber el tipo de caso.\n\nPor ejemplo:\n- \"Civil\": divorcio, herencias, contratos\n- \"Laboral\": demanda por despido, liquidación\n- \"Penal\": denuncia por agresión, estafa\n- \"No sé cuál es mi categoría\": si no está seguro\n\n¿En qué categoría está su caso?",
    }
}

/// Request for a brief case description, tailored to the category.
pub fn describe_prompt(category: CaseCategory) -> &'static str {
    match category {
        CaseCategory::Civil => "Caso civil registrado. Cuénteme brevemente: ¿qué problema tiene con contratos, familia o propiedades?",
        CaseCategory::Labor => "Caso laboral registrado. Cuénteme brevemente: ¿qué situación tiene con su trabajo o empleador?",
        CaseCategory::Criminal => "Caso penal registrado. Cuénteme brevemente: ¿qué hecho delictivo o infracción ocurrió?",
        CaseCategory::Unspecified => "No hay problema. Cuénteme brevemente qué está sucediendo y le ayudo a identificar la categoría.",
    }
}

// =============================================================================
// Contact collection
// =============================================================================

pub const ASK_EMAIL: &str = "Gracias por la información. Un abogado especializado revisará su caso.\n\nPara enviarle los detalles de la cita, ¿me indica su correo electrónico?";

pub const ASK_PHONE: &str = "Perfecto. ¿Y un teléfono de contacto?";

pub const EMAIL_INVALID: &str = "Ese correo no parece válido. ¿Me lo repite? Por ejemplo: nombre@dominio.com";

pub const PHONE_INVALID: &str = "Ese teléfono no parece válido. Necesito un número con al menos 7 dígitos.";

// =============================================================================
// Scheduling
// =============================================================================

const FEE_DISCLOSURE: &str = "Recuerde: si su caso supera los 10 millones, no hay costo inicial. Solo paga el 10% si recuperamos su dinero.";

/// Fee disclosure plus the first slot proposal.
pub fn first_proposal(slot_id: SlotId) -> String {
    format!(
        "Gracias por la información. Un abogado especializado revisará su caso.\n\n{}\n\nLe propongo el primer horario disponible:\n¿Le viene bien el {}?\n\nResponda \"sí\" para confirmar, \"no\" para otro horario, o \"mejor tarde\" si prefiere la tarde.",
        FEE_DISCLOSURE,
        slots::slot(slot_id).label()
    )
}

/// Proposal of the next candidate after a rejection.
pub fn next_proposal(slot_id: SlotId) -> String {
    format!(
        "Entiendo. Le propongo:\n{}.\n\n¿Le funciona este horario?",
        slots::slot(slot_id).label()
    )
}

/// List of afternoon slots, built from the catalogue.
pub fn afternoon_list() -> String {
    let mut text = String::from("De acuerdo. Horarios de tarde disponibles:\n");
    for &id in slots::candidates(Some(Period::Afternoon)) {
        text.push_str(&format!("- {}\n", slots::slot(id).label()));
    }
    text.push_str("\n¿Cuál prefiere?");
    text
}

/// Confirmation echoing the contact fields collected so far.
pub fn confirmation(session: &Session) -> String {
    let slot_label = session
        .confirmed_slot
        .map(|id| slots::slot(id).label())
        .unwrap_or_else(|| "el horario acordado".to_string());

    let mut text = format!("¡Perfecto! Cita confirmada para el {}.\n\n{}\n\n", slot_label, FEE_DISCLOSURE);

    match &session.email {
        Some(email) => text.push_str(&format!("Recibirá un correo en {} con los detalles.", email)),
        None => text.push_str("Recibirá un correo con los detalles."),
    }
    if let Some(phone) = &session.phone {
        text.push_str(&format!(" Si es necesario, le llamaremos al {}.", phone));
    }
    text.push_str(" ¿Necesita algo más?");
    text
}

// =============================================================================
// Closing
// =============================================================================

pub const CLOSING: &str = "Ha sido un placer ayudarle. Si necesita algo más, estoy aquí. ¡Que tenga un excelente día!";

pub const CLOSED_ALREADY: &str = "Su registro ya está cerrado. Ha sido un placer ayudarle. ¡Que tenga un excelente día!";

pub const CONFIRMED_ACK: &str = "Entendido, lo anotamos para su cita. ¿Necesita algo más?";

// =============================================================================
// Informational blocks and interruptions
// =============================================================================

pub const INFO_ROLE: &str = "Las opciones son: víctima (si sufrió un daño) o demandante (si inicia una demanda). ¿Cuál es su caso?";

pub const INFO_CATEGORIES: &str = "Categorías: civil (familia, contratos), laboral (trabajo), penal (delitos), o no sé cuál es. ¿En cuál está su caso?";

pub const INFO_SCHEDULE: &str = "Horarios disponibles: Lunes 29, Miércoles 1 o Viernes 3. ¿Qué día le viene mejor?";

pub const INTERRUPTING_DEFERRAL: &str = "Entiendo su consulta. Para darle una respuesta precisa, necesito primero completar su registro. ¿Podemos continuar con la información del caso?";

// =============================================================================
// Repeat and default guidance
// =============================================================================

/// Re-emit the question appropriate to the session's current stage.
pub fn repeat_prompt(session: &Session, collect_name: bool) -> String {
    match session.stage {
        Stage::Greeting => welcome(collect_name).to_string(),
        Stage::AwaitingName => "¿Me indica su nombre, por favor?".to_string(),
        Stage::AwaitingRole => WELCOME_ROLE.to_string(),
        Stage::AwaitingCategory => match session.role {
            Some(role) => category_prompt(role).to_string(),
            None => INFO_CATEGORIES.to_string(),
        },
        Stage::AwaitingDescription => {
            describe_prompt(session.category.unwrap_or(CaseCategory::Unspecified)).to_string()
        }
        Stage::AwaitingEmail => "¿Me indica su correo electrónico?".to_string(),
        Stage::AwaitingPhone => "¿Me indica un teléfono de contacto?".to_string(),
        Stage::AwaitingSlotChoice => match session.proposed_slot {
            Some(id) => format!(
                "Le propongo: {}. ¿Le funciona este horario?",
                slots::slot(id).label()
            ),
            None => INFO_SCHEDULE.to_string(),
        },
        Stage::Confirmed => confirmation(session),
        Stage::Closed => CLOSED_ALREADY.to_string(),
    }
}

fn missing_field(stage: Stage) -> &'static str {
    match stage {
        Stage::Greeting => "un saludo para comenzar",
        Stage::AwaitingName => "su nombre",
        Stage::AwaitingRole => "su rol: víctima o demandante",
        Stage::AwaitingCategory => "la categoría del caso: civil, laboral o penal",
        Stage::AwaitingDescription => "una breve descripción de su caso",
        Stage::AwaitingEmail => "su correo electrónico",
        Stage::AwaitingPhone => "un teléfono de contacto",
        Stage::AwaitingSlotChoice => "saber si le viene bien el horario propuesto",
        Stage::Confirmed | Stage::Closed => "nada más por el momento",
    }
}

/// Default guidance naming the still-missing field. The phrasing rotates
/// with the turn count so a stuck caller does not see the same sentence
/// forever.
pub fn guidance(stage: Stage, turn_count: u32) -> String {
    let field = missing_field(stage);
    match turn_count % 3 {
        0 => format!(
            "¿Podría ser más específico? Necesito {} para agendar su cita con el abogado.",
            field
        ),
        1 => format!("Disculpe, no le he entendido. ¿Me indica {}?", field),
        _ => format!("Para continuar con su registro, necesito {}.", field),
    }
}
