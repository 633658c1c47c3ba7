use serde::{Deserialize, Serialize};

/// Modifier flags of a key identifier.
///
/// A struct of flags rather than an enum of combinations: with four
/// modifiers the combination enum would need sixteen variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !(self.alt || self.ctrl || self.meta || self.shift)
    }
}

/// Canonical identifier of a key combination, used for keymap lookup.
///
/// Construction goes through [`KeyId::new`] so that every producer (the
/// spec parser and the keyboard-event side) canonicalizes identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyId {
    key: String,
    modifiers: Modifiers,
}

impl KeyId {
    /// Lowercases `key` and canonicalizes `modifiers`.
    ///
    /// The shift flag is dropped for a single-character key without any
    /// other modifier: whether shift is required to produce such a
    /// character depends on the keyboard layout, so it must not
    /// distinguish identifiers. Multi-character key names keep their
    /// shift flag.
    pub fn new(key: &str, modifiers: Modifiers) -> Self {
        let key = key.to_lowercase();
        let mut modifiers = modifiers;
        if is_single_char(&key) && !(modifiers.alt || modifiers.ctrl || modifiers.meta) {
            modifiers.shift = false;
        }
        Self { key, modifiers }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// A single character without any modifier. Such identifiers are the
    /// ones that collide with ordinary typing.
    pub fn is_plain_char(&self) -> bool {
        is_single_char(&self.key) && self.modifiers.is_empty()
    }

    pub fn display(&self) -> String {
        let Modifiers {
            alt,
            ctrl,
            meta,
            shift,
        } = self.modifiers;
        [
            (ctrl, "ctrl"),
            (alt, "alt"),
            (meta, "meta"),
            (shift, "shift"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .chain(std::iter::once(self.key.as_str()))
        .collect::<Vec<_>>()
        .join("+")
    }
}

fn is_single_char(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some() && chars.next().is_none()
}
