use std::fmt;
use std::time::Duration;

/// Which property is being transitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionProperty {
    Height,
    Opacity,
}

impl TransitionProperty {
    pub fn name(self) -> &'static str {
        match self {
            TransitionProperty::Height => "height",
            TransitionProperty::Opacity => "opacity",
        }
    }
}

impl fmt::Display for TransitionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub delay: Duration,
}

impl TransitionConfig {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Time from the property change until `transitionend` fires.
    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }
}

/// Transitions configuration for an element.
/// Similar to Style, this is a builder for configuring property transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transitions {
    pub height: Option<TransitionConfig>,
    pub opacity: Option<TransitionConfig>,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, duration: Duration) -> Self {
        self.height = Some(TransitionConfig::new(duration));
        self
    }

    pub fn opacity(mut self, duration: Duration) -> Self {
        self.opacity = Some(TransitionConfig::new(duration));
        self
    }

    /// Set transition for every supported property.
    pub fn all(self, duration: Duration) -> Self {
        self.height(duration).opacity(duration)
    }

    /// Replace the config of one property.
    pub fn with(mut self, property: TransitionProperty, config: TransitionConfig) -> Self {
        match property {
            TransitionProperty::Height => self.height = Some(config),
            TransitionProperty::Opacity => self.opacity = Some(config),
        }
        self
    }

    pub fn get(&self, property: TransitionProperty) -> Option<TransitionConfig> {
        match property {
            TransitionProperty::Height => self.height,
            TransitionProperty::Opacity => self.opacity,
        }
    }

    /// Layer `other` on top of `self`; properties set in `other` win.
    pub fn merge(&mut self, other: &Transitions) {
        if other.height.is_some() {
            self.height = other.height;
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
    }

    /// Returns true if any transition is configured.
    pub fn has_any(&self) -> bool {
        self.height.is_some() || self.opacity.is_some()
    }

    /// The longest total time of any configured property.
    pub fn longest(&self) -> Duration {
        [self.height, self.opacity]
            .into_iter()
            .flatten()
            .map(|config| config.total())
            .max()
            .unwrap_or(Duration::ZERO)
    }
}
