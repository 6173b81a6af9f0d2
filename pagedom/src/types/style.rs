use crate::transitions::Transitions;

/// Block height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Height {
    /// Sized by content.
    #[default]
    Auto,
    /// Explicit height in pixels.
    Px(u32),
}

impl Height {
    pub fn is_auto(self) -> bool {
        matches!(self, Height::Auto)
    }

    pub fn px(self) -> Option<u32> {
        match self {
            Height::Auto => None,
            Height::Px(px) => Some(px),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// Declarations shared by stylesheet rules and inline styles.
///
/// Unset fields fall through to earlier rules, then to the initial values
/// of [`ComputedStyle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub display: Option<Display>,
    pub opacity: Option<f32>,
    pub transitions: Transitions,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn hidden(self) -> Self {
        self.display(Display::None)
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = transitions;
        self
    }

    /// Layer `other` on top of `self`.
    pub fn apply(&mut self, other: &Style) {
        if other.display.is_some() {
            self.display = other.display;
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
        self.transitions.merge(&other.transitions);
    }
}

/// Resolved style of an element after the cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub opacity: f32,
    pub transitions: Transitions,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            opacity: 1.0,
            transitions: Transitions::default(),
        }
    }
}

impl From<Style> for ComputedStyle {
    fn from(style: Style) -> Self {
        let initial = ComputedStyle::default();
        Self {
            display: style.display.unwrap_or(initial.display),
            opacity: style.opacity.unwrap_or(initial.opacity),
            transitions: style.transitions,
        }
    }
}
