//! Structured labels for projections and entities.
//!
//! Points and lines use Latin names with a view suffix (`A1`, `r2`); planes
//! use Greek letters with a trace prefix (`hα`, `fα`). A bracketed label
//! marks the degenerate member of a family: `(r1)` is the horizontal
//! projection of a line seen end-on, `(hα)` the lone trace of a plane
//! parallel to one reference plane.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::View;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("empty label")]
    Empty,
    #[error("label '{0}' contains characters outside [A-Za-z0-9] or an unknown Greek letter")]
    InvalidCharacter(String),
}

macro_rules! greek_letters {
    ($($variant:ident => $name:literal, $glyph:literal;)*) => {
        /// Greek letters accepted as plane names.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum GreekLetter {
            $($variant,)*
        }

        impl GreekLetter {
            pub const ALL: &'static [GreekLetter] = &[$(GreekLetter::$variant,)*];

            /// ASCII name, as typed by a user (`"alpha"`).
            pub fn name(self) -> &'static str {
                match self {
                    $(GreekLetter::$variant => $name,)*
                }
            }

            /// Display glyph (`'α'`).
            pub fn glyph(self) -> char {
                match self {
                    $(GreekLetter::$variant => $glyph,)*
                }
            }
        }
    };
}

greek_letters! {
    Alpha => "alpha", 'α';
    Beta => "beta", 'β';
    Gamma => "gamma", 'γ';
    Delta => "delta", 'δ';
    Epsilon => "epsilon", 'ε';
    Zeta => "zeta", 'ζ';
    Eta => "eta", 'η';
    Theta => "theta", 'θ';
    Thetasym => "thetasym", 'ϑ';
    Iota => "iota", 'ι';
    Kappa => "kappa", 'κ';
    Lambda => "lambda", 'λ';
    Mu => "mu", 'μ';
    Nu => "nu", 'ν';
    Xi => "xi", 'ξ';
    Omicron => "omicron", 'ο';
    Pi => "pi", 'π';
    Piv => "piv", 'ϖ';
    Rho => "rho", 'ρ';
    Sigmaf => "sigmaf", 'ς';
    Sigma => "sigma", 'σ';
    Tau => "tau", 'τ';
    Upsilon => "upsilon", 'υ';
    Phi => "phi", 'φ';
    Chi => "chi", 'χ';
    Psi => "psi", 'ψ';
    Omega => "omega", 'ω';
}

impl GreekLetter {
    /// Accepts either the ASCII name (case-insensitive) or the single glyph.
    pub fn parse(input: &str) -> Option<GreekLetter> {
        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(letter) = Self::ALL.iter().copied().find(|l| l.glyph() == c) {
                return Some(letter);
            }
        }
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for GreekLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LabelBase {
    Greek(GreekLetter),
    Latin(String),
}

/// A parsed label.
///
/// `Display` and `FromStr` are inverses; serde goes through the display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label {
    pub base: LabelBase,
    pub view: Option<View>,
    pub bracketed: bool,
}

impl Label {
    pub fn latin(name: impl Into<String>) -> Self {
        Self {
            base: LabelBase::Latin(name.into()),
            view: None,
            bracketed: false,
        }
    }

    pub fn greek(letter: GreekLetter) -> Self {
        Self {
            base: LabelBase::Greek(letter),
            view: None,
            bracketed: false,
        }
    }

    /// The reference ground line, `x`.
    pub fn ground() -> Self {
        Self::latin("x")
    }

    pub fn is_ground(&self) -> bool {
        *self == Self::ground()
    }

    pub fn is_greek(&self) -> bool {
        matches!(self.base, LabelBase::Greek(_))
    }

    /// Same base tagged with `view`.
    pub fn in_view(&self, view: View) -> Self {
        Self {
            view: Some(view),
            ..self.clone()
        }
    }

    pub fn into_bracketed(self) -> Self {
        Self {
            bracketed: true,
            ..self
        }
    }

    /// The untagged, unbracketed base (`r` for `(r1)`).
    pub fn base_label(&self) -> Self {
        Self {
            base: self.base.clone(),
            view: None,
            bracketed: false,
        }
    }

    fn parse_latin(body: &str) -> Option<(String, Option<View>)> {
        if body.is_empty() || !body.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        let view = match body.chars().last() {
            Some('1') if body.len() > 1 => Some(View::Horizontal),
            Some('2') if body.len() > 1 => Some(View::Frontal),
            _ => None,
        };
        let base = if view.is_some() { &body[..body.len() - 1] } else { body };
        Some((base.to_string(), view))
    }

    fn parse_greek(body: &str) -> Option<(GreekLetter, Option<View>)> {
        if let Some(letter) = GreekLetter::parse(body) {
            return Some((letter, None));
        }
        let mut chars = body.chars();
        let view = match chars.next()? {
            'h' => View::Horizontal,
            'f' => View::Frontal,
            _ => return None,
        };
        GreekLetter::parse(chars.as_str()).map(|letter| (letter, Some(view)))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match (&self.base, self.view) {
            (LabelBase::Greek(letter), Some(view)) => format!("{}{}", view.trace_prefix(), letter.glyph()),
            (LabelBase::Greek(letter), None) => letter.glyph().to_string(),
            (LabelBase::Latin(name), Some(view)) => format!("{}{}", name, view.suffix()),
            (LabelBase::Latin(name), None) => name.clone(),
        };
        if self.bracketed {
            write!(f, "({})", body)
        } else {
            write!(f, "{}", body)
        }
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(LabelError::Empty);
        }
        let (body, bracketed) = match input.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            Some(inner) => (inner, true),
            None => (input, false),
        };
        if body.is_empty() {
            return Err(LabelError::Empty);
        }
        if let Some((letter, view)) = Self::parse_greek(body) {
            return Ok(Self {
                base: LabelBase::Greek(letter),
                view,
                bracketed,
            });
        }
        match Self::parse_latin(body) {
            Some((name, view)) => Ok(Self {
                base: LabelBase::Latin(name),
                view,
                bracketed,
            }),
            None => Err(LabelError::InvalidCharacter(input.to_string())),
        }
    }
}

impl TryFrom<String> for Label {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}
