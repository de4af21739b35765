//! Ordered keyword rules for intent recognition.
//!
//! Evaluated top to bottom; the first rule whose keyword set has a non-empty
//! intersection with substrings of the lower-cased message wins. The order is
//! a deliberate tie-break policy, not an artifact: greeting keywords beat
//! role keywords, role keywords beat category keywords, and so on, because
//! later rules' keywords can appear as substrings inside earlier, more
//! specific phrasings.

use super::Intent;

/// A single keyword-membership rule.
pub struct KeywordRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Whether `kw` occurs in `lowered` on word boundaries.
///
/// Plain substring search would fire "si" inside "depósito" or "no" inside
/// "noche"; a keyword only counts when the characters around the match are
/// not alphanumeric.
pub fn contains_keyword(lowered: &str, kw: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = lowered[start..].find(kw) {
        let abs = start + pos;
        let end = abs + kw.len();
        let before_ok = lowered[..abs]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = lowered[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = abs
            + lowered[abs..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
    }
    false
}

/// Priority-ordered rule table. All keywords are lower-case; accented and
/// unaccented spellings are both listed because callers type either.
pub const RULES: &[KeywordRule] = &[
    // Restart goes first: "empezar de nuevo" contains the greeting keyword
    // "empezar" and must not be swallowed by it.
    KeywordRule {
        intent: Intent::RestartRequest,
        keywords: &[
            "reiniciar",
            "empezar de nuevo",
            "comenzar de nuevo",
            "volver a empezar",
            "desde el principio",
        ],
    },
    KeywordRule {
        intent: Intent::Greeting,
        keywords: &[
            "hola",
            "buenos días",
            "buenos dias",
            "buenas tardes",
            "saludos",
            "buenos",
            "buenas",
            "iniciar",
            "empezar",
        ],
    },
    KeywordRule {
        intent: Intent::RoleVictim,
        keywords: &["víctima", "victima"],
    },
    KeywordRule {
        intent: Intent::RolePlaintiff,
        keywords: &["demandante"],
    },
    KeywordRule {
        intent: Intent::CategoryCivil,
        keywords: &["civil"],
    },
    KeywordRule {
        intent: Intent::CategoryLabor,
        keywords: &["laboral"],
    },
    KeywordRule {
        intent: Intent::CategoryCriminal,
        keywords: &["penal"],
    },
    // "no sé" must stay ahead of the bare negative below.
    KeywordRule {
        intent: Intent::CategoryUnknown,
        keywords: &["no sé", "no se", "no estoy seguro", "no estoy segura"],
    },
    // "no entendí" contains "no"; checked before the negative.
    KeywordRule {
        intent: Intent::RepeatRequest,
        keywords: &["repetir", "repita", "no entendí", "no entendi"],
    },
    KeywordRule {
        intent: Intent::Affirmative,
        keywords: &["sí", "si", "ok", "de acuerdo", "confirmo", "acepto"],
    },
    KeywordRule {
        intent: Intent::Negative,
        keywords: &["no me viene", "otro horario", "otra hora", "no"],
    },
    KeywordRule {
        intent: Intent::PrefersAfternoon,
        keywords: &["mejor tarde", "en la tarde", "por la tarde", "tarde"],
    },
    KeywordRule {
        intent: Intent::SlotChoice,
        keywords: &[
            "lunes",
            "miércoles",
            "miercoles",
            "viernes",
            "10:30",
            "3:30",
            "4:15",
            "3:45",
        ],
    },
    KeywordRule {
        intent: Intent::TopicRole,
        keywords: &["opciones de rol", "rol"],
    },
    KeywordRule {
        intent: Intent::TopicCategories,
        keywords: &["categorías", "categorias", "tipos de caso"],
    },
    KeywordRule {
        intent: Intent::TopicSchedule,
        keywords: &["horarios", "fechas"],
    },
    KeywordRule {
        intent: Intent::InterruptingLegalTopic,
        keywords: &["divorcio", "custodia", "pensión", "pension", "herencia", "despido"],
    },
    KeywordRule {
        intent: Intent::Closing,
        keywords: &["gracias", "listo", "eso es todo", "nada más", "nada mas"],
    },
];
