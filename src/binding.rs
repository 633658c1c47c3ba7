use std::fmt;
use std::rc::Rc;

use keyspec::KeyId;
use nonempty::NonEmpty;

use crate::host::{ElementRef, SyntheticEvent};

/// Argument sentinel for bindings declared without an argument; never
/// produced by a real directive argument.
pub const DEFAULT_ARGUMENT: &str = "=";

pub type HotkeyCallback<C> = Rc<dyn Fn(&C, &ElementRef)>;

/// What a binding performs once one of its keys fires.
pub enum Action<C> {
    /// User callback, invoked with the enclosing logical context and the
    /// resolved target element.
    Callback {
        callback: HotkeyCallback<C>,
        context: Rc<C>,
    },
    /// Synthetic event dispatched on the resolved target element.
    Dispatch(SyntheticEvent),
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Callback { .. } => f.write_str("Callback"),
            Action::Dispatch(event) => write!(f, "Dispatch({})", event.event_type),
        }
    }
}

/// One binding instance's resolved configuration. Immutable after creation;
/// an update that survives the equality fast path replaces it wholesale.
pub struct Binding<C> {
    pub argument: String,
    /// Disabled bindings are validated and stored but never dispatched.
    pub enabled: bool,
    /// Raw key spec texts, kept for the key hint display.
    pub keys: NonEmpty<String>,
    pub key_ids: NonEmpty<KeyId>,
    pub action: Action<C>,
    pub selector: String,
    pub priority: f64,
    pub element: ElementRef,
    pub display_keys: bool,
}

impl<C> fmt::Debug for Binding<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("argument", &self.argument)
            .field("enabled", &self.enabled)
            .field("keys", &self.keys)
            .field("action", &self.action)
            .field("selector", &self.selector)
            .field("priority", &self.priority)
            .field("display_keys", &self.display_keys)
            .finish_non_exhaustive()
    }
}
