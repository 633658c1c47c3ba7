use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use itertools::Itertools;
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::binding::{Action, Binding, HotkeyCallback, DEFAULT_ARGUMENT};
use crate::errors::HotkeyError;
use crate::host::{ElementRef, SyntheticEvent};

pub(crate) const KNOWN_OPTIONS: [&str; 6] = [
    "enabled",
    "keys",
    "action",
    "selector",
    "priority",
    "displayKeys",
];

/// Binding configuration defaults, merged under every configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyDefaults {
    pub enabled: bool,
    pub action: String,
    pub selector: String,
    pub priority: f64,
    pub display_keys: bool,
}

impl Default for HotkeyDefaults {
    fn default() -> Self {
        Self {
            enabled: true,
            action: "click".to_string(),
            selector: "*".to_string(),
            priority: 0.0,
            display_keys: false,
        }
    }
}

/// Install-time patch for [`HotkeyDefaults`]; `None` fields keep the
/// built-in value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultOverrides {
    pub enabled: Option<bool>,
    pub action: Option<String>,
    pub selector: Option<String>,
    pub priority: Option<f64>,
    pub display_keys: Option<bool>,
}

impl HotkeyDefaults {
    pub(crate) fn apply(&mut self, overrides: DefaultOverrides) {
        let DefaultOverrides {
            enabled,
            action,
            selector,
            priority,
            display_keys,
        } = overrides;
        if let Some(enabled) = enabled {
            self.enabled = enabled;
        }
        if let Some(action) = action {
            self.action = action;
        }
        if let Some(selector) = selector {
            self.selector = selector;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(display_keys) = display_keys {
            self.display_keys = display_keys;
        }
    }
}

pub type OptionMap<C> = IndexMap<String, OptionValue<C>>;

/// Raw configuration value, as declared on the host binding.
pub enum HotkeyValue<C> {
    /// A single key spec, e.g. `"ctrl+s"`.
    Keys(String),
    /// Several key specs bound to the same action.
    KeyList(Vec<String>),
    /// Full configuration map; see [`KNOWN_OPTIONS`] for the recognized
    /// fields.
    Options(OptionMap<C>),
}

/// A field value inside [`HotkeyValue::Options`].
pub enum OptionValue<C> {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<OptionValue<C>>),
    Callback(HotkeyCallback<C>),
    /// A pre-built event to dispatch verbatim.
    Event(SyntheticEvent),
}

impl<C> fmt::Debug for OptionValue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{value}"),
            OptionValue::Number(value) => write!(f, "{value}"),
            OptionValue::Text(value) => write!(f, "{value:?}"),
            OptionValue::List(values) => f.debug_list().entries(values).finish(),
            OptionValue::Callback(_) => f.write_str("<callback>"),
            OptionValue::Event(event) => write!(f, "Event({})", event.event_type),
        }
    }
}

impl<C> fmt::Debug for HotkeyValue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HotkeyValue::Keys(text) => write!(f, "{text:?}"),
            HotkeyValue::KeyList(texts) => f.debug_list().entries(texts).finish(),
            HotkeyValue::Options(options) => f.debug_map().entries(options).finish(),
        }
    }
}

/// Structural equality over the configuration value tree. Callbacks compare
/// by identity: the same `Rc` across renders counts as unchanged.
impl<C> PartialEq for OptionValue<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptionValue::Bool(a), OptionValue::Bool(b)) => a == b,
            // NaN stays unequal to itself, so a NaN priority never takes
            // the unchanged-value fast path.
            (OptionValue::Number(a), OptionValue::Number(b)) => a == b,
            (OptionValue::Text(a), OptionValue::Text(b)) => a == b,
            (OptionValue::List(a), OptionValue::List(b)) => a == b,
            (OptionValue::Callback(a), OptionValue::Callback(b)) => Rc::ptr_eq(a, b),
            (OptionValue::Event(a), OptionValue::Event(b)) => a == b,
            _ => false,
        }
    }
}

impl<C> PartialEq for HotkeyValue<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HotkeyValue::Keys(a), HotkeyValue::Keys(b)) => a == b,
            (HotkeyValue::KeyList(a), HotkeyValue::KeyList(b)) => a == b,
            // IndexMap equality is key-set based, not order based.
            (HotkeyValue::Options(a), HotkeyValue::Options(b)) => a == b,
            _ => false,
        }
    }
}

impl<C> OptionValue<C> {
    /// Truthiness of a configuration value: everything is true except
    /// `false`, zero, NaN and the empty string.
    fn truthy(&self) -> bool {
        match self {
            OptionValue::Bool(value) => *value,
            OptionValue::Number(value) => *value != 0.0 && !value.is_nan(),
            OptionValue::Text(value) => !value.is_empty(),
            OptionValue::List(_) | OptionValue::Callback(_) | OptionValue::Event(_) => true,
        }
    }

    /// Numeric coercion for `priority`. Non-numeric values become NaN,
    /// which sorts deterministically via `f64::total_cmp`.
    fn as_number(&self) -> f64 {
        match self {
            OptionValue::Number(value) => *value,
            OptionValue::Bool(true) => 1.0,
            OptionValue::Bool(false) => 0.0,
            OptionValue::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            OptionValue::List(_) | OptionValue::Callback(_) | OptionValue::Event(_) => f64::NAN,
        }
    }

    fn text(&self) -> Option<String> {
        match self {
            OptionValue::Text(value) => Some(value.clone()),
            OptionValue::Number(value) => Some(value.to_string()),
            OptionValue::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    fn key_text(&self) -> Result<String, HotkeyError> {
        self.text().ok_or_else(|| {
            HotkeyError::MalformedKeySpec(keyspec::ParseError::InvalidKeyValue(format!(
                "{self:?}"
            )))
        })
    }
}

/// Validates a raw configuration value and resolves it into a [`Binding`].
///
/// Validation completes before the caller mutates any registry state, so a
/// failure here leaves the previously registered binding for the slot
/// intact.
pub(crate) fn normalize<C>(
    element: &ElementRef,
    argument: Option<&str>,
    value: Option<&HotkeyValue<C>>,
    context: &Rc<C>,
    defaults: &HotkeyDefaults,
) -> Result<Binding<C>, HotkeyError> {
    let value = value.ok_or(HotkeyError::MissingConfiguration)?;

    let mut enabled = defaults.enabled;
    let mut selector = defaults.selector.clone();
    let mut priority = defaults.priority;
    let mut display_keys = defaults.display_keys;
    let mut action = Action::Dispatch(SyntheticEvent::new(&defaults.action));
    let mut key_texts: Vec<String> = Vec::new();

    match value {
        HotkeyValue::Keys(text) => {
            if !text.is_empty() {
                key_texts.push(text.clone());
            }
        }
        HotkeyValue::KeyList(texts) => key_texts.extend_from_slice(texts),
        HotkeyValue::Options(options) => {
            if let Some(option) = options
                .keys()
                .find(|option| !KNOWN_OPTIONS.contains(&option.as_str()))
            {
                return Err(HotkeyError::UnknownOption {
                    option: option.clone(),
                    known: KNOWN_OPTIONS.iter().join(", "),
                });
            }
            match options.get("keys") {
                Some(OptionValue::Text(text)) if !text.is_empty() => {
                    key_texts.push(text.clone());
                }
                Some(OptionValue::List(entries)) => {
                    for entry in entries {
                        key_texts.push(entry.key_text()?);
                    }
                }
                _ => {}
            }
            if let Some(value) = options.get("enabled") {
                enabled = value.truthy();
            }
            if let Some(OptionValue::Text(text)) = options.get("selector") {
                selector = text.clone();
            }
            if let Some(value) = options.get("priority") {
                priority = value.as_number();
            }
            if let Some(value) = options.get("displayKeys") {
                display_keys = value.truthy();
            }
            match options.get("action") {
                Some(OptionValue::Callback(callback)) => {
                    action = Action::Callback {
                        callback: Rc::clone(callback),
                        context: Rc::clone(context),
                    };
                }
                Some(OptionValue::Event(event)) => action = Action::Dispatch(event.clone()),
                Some(value) => {
                    if let Some(name) = value.text() {
                        action = Action::Dispatch(SyntheticEvent::new(name));
                    }
                }
                None => {}
            }
        }
    }

    let keys = NonEmpty::from_vec(key_texts).ok_or(HotkeyError::MissingKeys)?;
    let key_ids = NonEmpty {
        head: keyspec::parse_key_spec(&keys.head)?,
        tail: keys
            .tail
            .iter()
            .map(|text| keyspec::parse_key_spec(text))
            .collect::<Result<_, _>>()?,
    };

    Ok(Binding {
        argument: argument.unwrap_or(DEFAULT_ARGUMENT).to_string(),
        enabled,
        keys,
        key_ids,
        action,
        selector,
        priority,
        element: Rc::clone(element),
        display_keys,
    })
}
