use std::rc::Rc;

use keyspec::{KeyId, Modifiers};

/// A handle to a host UI element.
///
/// The engine never walks the host tree itself; everything it needs from an
/// element sits behind this trait. Selector semantics belong to the host —
/// the engine only requires that `"*"` matches any element.
pub trait Element {
    fn matches(&self, selector: &str) -> bool;

    /// First descendant matching `selector`, in host document order.
    fn query_selector(&self, selector: &str) -> Option<ElementRef>;

    fn dispatch_event(&self, event: &SyntheticEvent);

    fn is_content_editable(&self) -> bool {
        false
    }

    /// Whether this is a text-input-like control with an active selection.
    fn has_text_selection(&self) -> bool {
        false
    }

    fn is_button_like(&self) -> bool {
        false
    }

    /// Render `keys` as a visual hint inside the element.
    fn append_key_hint(&self, _keys: &str) {}
}

pub type ElementRef = Rc<dyn Element>;

/// Registry key for an element, by handle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    pub fn of(element: &ElementRef) -> Self {
        Self(Rc::as_ptr(element) as *const () as usize)
    }
}

/// Focus queries the dispatcher needs from the host document.
pub trait Document {
    fn active_element(&self) -> Option<ElementRef>;
}

/// Descriptor of a synthetic event dispatched on a target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticEvent {
    pub event_type: String,
    pub bubbles: bool,
    pub cancelable: bool,
}

impl SyntheticEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: true,
            cancelable: false,
        }
    }
}

/// A keyboard event as delivered by the host, before canonicalization.
///
/// `key` is the logical key name, `code` the physical key code; either may
/// be empty. Autocomplete widgets are known to synthesize events carrying
/// neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: String,
    pub code: String,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyboardEvent {
    pub fn is_spurious(&self) -> bool {
        self.key.is_empty() && self.code.is_empty()
    }

    /// Canonical identifier of this event, using the same rules as the key
    /// spec parser. A missing key name falls back to the physical code with
    /// its `Key`/`Digit` prefix stripped, so `KeyS` and `Digit1` resolve
    /// like `s` and `1`.
    pub fn key_id(&self) -> KeyId {
        let key = if self.key.is_empty() {
            strip_physical_prefix(&self.code)
        } else {
            self.key.as_str()
        };
        KeyId::new(
            key,
            Modifiers {
                alt: self.alt,
                ctrl: self.ctrl,
                meta: self.meta,
                shift: self.shift,
            },
        )
    }
}

fn strip_physical_prefix(code: &str) -> &str {
    for prefix in ["key", "digit"] {
        if let Some((head, tail)) = code.split_at_checked(prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) && !tail.is_empty() {
                return tail;
            }
        }
    }
    code
}
