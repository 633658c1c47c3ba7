pub mod key_id;

pub use crate::key_id::{KeyId, Modifiers};

/// A textual key spec of the form `[Ctrl+][Shift+][Alt+][Meta+]key_value`,
/// case-insensitive, modifiers in any order and combination. `key_value` is
/// a single character or an alphabetic name with optional trailing digits
/// (`f1`, `enter`).
#[derive(Debug, PartialEq)]
struct Token(String);

pub fn parse_key_specs<'a, I>(inputs: I) -> Result<Vec<KeyId>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    inputs.into_iter().map(parse_key_spec).collect()
}

pub fn parse_key_spec(input: &str) -> Result<KeyId, ParseError> {
    Token(input.into()).to_key_id()
}

impl Token {
    fn to_key_id(&self) -> Result<KeyId, ParseError> {
        let lowered = self.0.to_lowercase();
        let mut modifiers = Modifiers::default();
        let mut rest = lowered.as_str();
        loop {
            rest = if let Some(after) = rest.strip_prefix("ctrl+") {
                modifiers.ctrl = true;
                after
            } else if let Some(after) = rest.strip_prefix("shift+") {
                modifiers.shift = true;
                after
            } else if let Some(after) = rest.strip_prefix("alt+") {
                modifiers.alt = true;
                after
            } else if let Some(after) = rest.strip_prefix("meta+") {
                modifiers.meta = true;
                after
            } else {
                break;
            };
        }
        self.check_key_value(rest)?;
        Ok(KeyId::new(rest, modifiers))
    }

    fn check_key_value(&self, key: &str) -> Result<(), ParseError> {
        if key.is_empty() {
            return Err(ParseError::EmptyKey(self.0.clone()));
        }
        let mut chars = key.chars();
        if chars.next().is_some() && chars.next().is_none() {
            // Any single character is a valid key value, '+' included.
            return Ok(());
        }
        let digits = key.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        if digits.len() < key.len() && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(ParseError::InvalidKeyValue(self.0.clone()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyKey(String),
    InvalidKeyValue(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (ParseError::EmptyKey(input) | ParseError::InvalidKeyValue(input)) = self;
        write!(
            f,
            "expected [Ctrl+][Shift+][Alt+][Meta+]key_value, found: {input}"
        )
    }
}

impl std::error::Error for ParseError {}
