use std::cell::RefCell;
use std::rc::Rc;

use nonempty::NonEmpty;

use crate::binding::{Action, Binding};
use crate::host::{Document, Element, ElementRef, KeyboardEvent, SyntheticEvent};

/// Minimal element tree standing in for a host document.
///
/// Selector semantics: `*` matches everything, `#name` matches the id,
/// anything else matches the tag name.
#[derive(Default)]
pub(crate) struct TestElement {
    pub tag: String,
    pub id: String,
    pub editable: bool,
    pub text_selection: bool,
    pub children: RefCell<Vec<Rc<TestElement>>>,
    pub received: RefCell<Vec<String>>,
    pub key_hints: RefCell<Vec<String>>,
}

impl TestElement {
    pub fn tag(tag: &str) -> Rc<Self> {
        Rc::new(Self {
            tag: tag.to_string(),
            ..Self::default()
        })
    }

    pub fn with_id(tag: &str, id: &str) -> Rc<Self> {
        Rc::new(Self {
            tag: tag.to_string(),
            id: id.to_string(),
            ..Self::default()
        })
    }

    pub fn input(text_selection: bool) -> Rc<Self> {
        Rc::new(Self {
            tag: "input".to_string(),
            text_selection,
            ..Self::default()
        })
    }

    pub fn editable() -> Rc<Self> {
        Rc::new(Self {
            tag: "div".to_string(),
            editable: true,
            ..Self::default()
        })
    }

    pub fn append(parent: &Rc<Self>, child: Rc<Self>) {
        parent.children.borrow_mut().push(child);
    }

    pub fn events(&self) -> Vec<String> {
        self.received.borrow().clone()
    }

    pub fn key_hints(&self) -> Vec<String> {
        self.key_hints.borrow().clone()
    }
}

pub(crate) trait AsElement {
    fn as_element(&self) -> ElementRef;
}

impl AsElement for Rc<TestElement> {
    fn as_element(&self) -> ElementRef {
        Rc::<TestElement>::clone(self)
    }
}

impl Element for TestElement {
    fn matches(&self, selector: &str) -> bool {
        match selector.strip_prefix('#') {
            Some(id) => self.id == id,
            None => selector == "*" || self.tag == selector,
        }
    }

    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        for child in self.children.borrow().iter() {
            if child.matches(selector) {
                return Some(child.as_element());
            }
            if let Some(found) = child.query_selector(selector) {
                return Some(found);
            }
        }
        None
    }

    fn dispatch_event(&self, event: &SyntheticEvent) {
        self.received.borrow_mut().push(event.event_type.clone());
    }

    fn is_content_editable(&self) -> bool {
        self.editable
    }

    fn has_text_selection(&self) -> bool {
        self.text_selection
    }

    fn is_button_like(&self) -> bool {
        self.tag == "button"
    }

    fn append_key_hint(&self, keys: &str) {
        self.key_hints.borrow_mut().push(keys.to_string());
    }
}

pub(crate) struct TestDocument {
    active: RefCell<Option<ElementRef>>,
}

impl TestDocument {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            active: RefCell::new(None),
        })
    }

    pub fn focus(&self, element: &ElementRef) {
        *self.active.borrow_mut() = Some(Rc::clone(element));
    }

    pub fn blur(&self) {
        *self.active.borrow_mut() = None;
    }
}

impl Document for TestDocument {
    fn active_element(&self) -> Option<ElementRef> {
        self.active.borrow().clone()
    }
}

pub(crate) fn key_event(key: &str) -> KeyboardEvent {
    KeyboardEvent {
        key: key.to_string(),
        ..KeyboardEvent::default()
    }
}

pub(crate) fn test_binding(
    element: &ElementRef,
    argument: &str,
    keys: &[&str],
    priority: f64,
    event_type: &str,
) -> Binding<()> {
    let key_ids = keyspec::parse_key_specs(keys.iter().copied()).unwrap();
    Binding {
        argument: argument.to_string(),
        enabled: true,
        keys: NonEmpty::from_vec(keys.iter().map(|key| key.to_string()).collect()).unwrap(),
        key_ids: NonEmpty::from_vec(key_ids).unwrap(),
        action: Action::Dispatch(SyntheticEvent::new(event_type)),
        selector: "*".to_string(),
        priority,
        element: Rc::clone(element),
        display_keys: false,
    }
}
