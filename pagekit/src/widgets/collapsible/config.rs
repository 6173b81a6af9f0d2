use serde::{Deserialize, Serialize};

/// Selectors locating the item parts under the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapsibleSelectors {
    pub title: String,
    pub content: String,
}

impl Default for CollapsibleSelectors {
    fn default() -> Self {
        Self {
            title: "header".into(),
            content: "article".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapsibleClasses {
    /// Put on both the title and the content of an expanded item.
    pub active: String,
}

impl Default for CollapsibleClasses {
    fn default() -> Self {
        Self {
            active: "active".into(),
        }
    }
}

/// Resolved configuration of a [`Collapsible`](super::Collapsible).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollapsibleConfig {
    pub selectors: CollapsibleSelectors,
    pub classes: CollapsibleClasses,
    /// Event type that toggles an item when it reaches a title.
    pub event: String,
    /// At most one item expanded at a time.
    pub accordion: bool,
    /// Animate the content height.
    pub use_height: bool,
    /// Items expanded at construction and on `refresh(true)`.
    pub indexes: Vec<usize>,
}

impl Default for CollapsibleConfig {
    fn default() -> Self {
        Self {
            selectors: CollapsibleSelectors::default(),
            classes: CollapsibleClasses::default(),
            event: "click".into(),
            accordion: false,
            use_height: true,
            indexes: Vec::new(),
        }
    }
}

impl CollapsibleConfig {
    /// A copy of `self` with every field set in `options` replaced.
    pub fn merged(&self, options: &CollapsibleOptions) -> Self {
        let mut config = self.clone();
        if let Some(selectors) = &options.selectors {
            if let Some(title) = &selectors.title {
                config.selectors.title = title.clone();
            }
            if let Some(content) = &selectors.content {
                config.selectors.content = content.clone();
            }
        }
        if let Some(active) = options.classes.as_ref().and_then(|c| c.active.as_ref()) {
            config.classes.active = active.clone();
        }
        if let Some(event) = &options.event {
            config.event = event.clone();
        }
        if let Some(accordion) = options.accordion {
            config.accordion = accordion;
        }
        if let Some(use_height) = options.use_height {
            config.use_height = use_height;
        }
        if let Some(indexes) = &options.indexes {
            config.indexes = indexes.clone();
        }
        config
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassOptions {
    pub active: Option<String>,
}

/// Partial configuration; unset fields keep the defaults they are merged into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollapsibleOptions {
    pub selectors: Option<SelectorOptions>,
    pub classes: Option<ClassOptions>,
    pub event: Option<String>,
    pub accordion: Option<bool>,
    pub use_height: Option<bool>,
    pub indexes: Option<Vec<usize>>,
}

impl CollapsibleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_selector(mut self, selector: impl Into<String>) -> Self {
        self.selectors.get_or_insert_with(Default::default).title = Some(selector.into());
        self
    }

    pub fn content_selector(mut self, selector: impl Into<String>) -> Self {
        self.selectors.get_or_insert_with(Default::default).content = Some(selector.into());
        self
    }

    pub fn active_class(mut self, class: impl Into<String>) -> Self {
        self.classes = Some(ClassOptions {
            active: Some(class.into()),
        });
        self
    }

    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn accordion(mut self, accordion: bool) -> Self {
        self.accordion = Some(accordion);
        self
    }

    pub fn use_height(mut self, use_height: bool) -> Self {
        self.use_height = Some(use_height);
        self
    }

    pub fn indexes(mut self, indexes: impl IntoIterator<Item = usize>) -> Self {
        self.indexes = Some(indexes.into_iter().collect());
        self
    }
}
