/// An element inside a container, described by what makes it focusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub id: String,
    pub tag: String,
    pub has_href: bool,
    pub tabindex: Option<i32>,
    pub disabled: bool,
}

impl ElementInfo {
    pub fn new(id: &str, tag: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_lowercase(),
            has_href: false,
            tabindex: None,
            disabled: false,
        }
    }

    pub fn link(id: &str) -> Self {
        Self::new(id, "a").with_href()
    }

    pub fn with_href(mut self) -> Self {
        self.has_href = true;
        self
    }

    pub fn with_tabindex(mut self, tabindex: i32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Buttons, links with an href, form controls, and anything with a
    /// tabindex other than -1. Disabled controls never take focus.
    pub fn is_focusable(&self) -> bool {
        if self.disabled {
            return false;
        }

        let native = matches!(
            self.tag.as_str(),
            "button" | "input" | "select" | "textarea"
        );

        native || self.has_href || self.tabindex.is_some_and(|t| t != -1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Enter,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn tab() -> Self {
        Self { key: Key::Tab, shift: false }
    }

    pub fn shift_tab() -> Self {
        Self { key: Key::Tab, shift: true }
    }

    pub fn escape() -> Self {
        Self { key: Key::Escape, shift: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusDecision {
    /// Let the browser handle the key.
    PassThrough,
    /// Suppress the default and focus this element.
    MoveTo(String),
}

/// Keeps Tab cycling inside a container by wrapping at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTrap {
    first: Option<String>,
    last: Option<String>,
}

impl FocusTrap {
    /// Build from the container's elements in document order.
    pub fn new(elements: &[ElementInfo]) -> Self {
        let mut focusable = elements.iter().filter(|e| e.is_focusable());
        let first = focusable.next().map(|e| e.id.clone());
        let last = focusable.last().map(|e| e.id.clone()).or_else(|| first.clone());
        Self { first, last }
    }

    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn handle_key(&self, press: &KeyPress, active: &str) -> FocusDecision {
        if press.key != Key::Tab {
            return FocusDecision::PassThrough;
        }

        let (Some(first), Some(last)) = (&self.first, &self.last) else {
            return FocusDecision::PassThrough;
        };

        if press.shift && active == first {
            FocusDecision::MoveTo(last.clone())
        } else if !press.shift && active == last {
            FocusDecision::MoveTo(first.clone())
        } else {
            FocusDecision::PassThrough
        }
    }
}
