use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a line does not match the ingredient micro-grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unparseable ingredient line: {line:?}")]
pub struct ParseError {
    /// The offending input, kept for diagnostics
    pub line: String,
}

/// A structured ingredient line
///
/// Produced once per parse call and never mutated afterwards. `preposition` is
/// the French partitive fragment (`"de "` or `"d'"`) that would precede the
/// name when the line is rendered back as prose; it is empty exactly when
/// `unit` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: f32,
    pub unit: String,
    pub preposition: String,
    pub name: String,
}

/// Grammar: quantity (digits, optional `.`/`,` decimal part), optional unit
/// (shortest non-space run), optional explicit `de `/`d'`, remainder as name.
/// Whitespace between tokens is optional, so `5filet` and `5 filet` are the
/// same line. The unit and preposition groups stay absent (not empty) when the
/// tokens are missing; that distinction drives the inference below.
const INGREDIENT_PATTERN: &str = "^([0-9]+)[,.]?([0-9]+)?[ ]?(?:(.*?)[ ])?[ ]?(de |d')?(.*)$";

fn ingredient_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(INGREDIENT_PATTERN).unwrap())
}

/// First letters that elide the partitive: "d'ail", "d'huile", "d'olive"
fn infer_preposition(name: &str) -> &'static str {
    let elides = name
        .chars()
        .next()
        .map(|first| matches!(first.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'h'))
        .unwrap_or(false);

    if elides {
        "d'"
    } else {
        "de "
    }
}

impl Ingredient {
    /// Parse a free-text grocery line such as `125 g fromage frais` or
    /// `5filet d'anchois à l'huile`.
    ///
    /// Pure and deterministic: the same line always yields the same record or
    /// the same error.
    ///
    /// # Errors
    /// Returns [`ParseError`] when no leading quantity token is found or no
    /// name remains after the quantity and unit tokens.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let fail = || ParseError {
            line: raw.to_owned(),
        };

        let caps = ingredient_regex().captures(raw).ok_or_else(fail)?;

        let name = caps.get(5).map_or("", |m| m.as_str()).trim();
        if name.is_empty() {
            return Err(fail());
        }

        let unit = caps.get(3).map_or("", |m| m.as_str());

        // An explicit "de "/"d'" in the line wins over inference, and a
        // missing unit forces the bare form ("1 oignon", not "1 d'oignon").
        let preposition = match unit {
            "" => "",
            _ => caps
                .get(4)
                .map_or_else(|| infer_preposition(name), |m| m.as_str()),
        };

        let integer_part = caps.get(1).ok_or_else(fail)?.as_str();

        // Comma is a valid decimal separator: "1,5" == "1.5"
        let quantity = match caps.get(2) {
            Some(decimal_part) => format!("{integer_part}.{}", decimal_part.as_str())
                .parse::<f32>()
                .map_err(|_| fail())?,
            None => integer_part.parse::<f32>().map_err(|_| fail())?,
        };

        Ok(Self {
            quantity,
            unit: unit.to_owned(),
            preposition: preposition.to_owned(),
            name: name.to_owned(),
        })
    }
}
