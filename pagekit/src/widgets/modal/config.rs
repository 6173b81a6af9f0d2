use std::fmt;
use std::sync::Arc;

use pagedom::NodeId;
use serde::{Deserialize, Serialize};

use super::Modal;

/// Built-in behaviour of a `data-type` element inside the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Close,
    Cancel,
    Confirm,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Cancel => "cancel",
            Self::Confirm => "confirm",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "close" => Some(Self::Close),
            "cancel" => Some(Self::Cancel),
            "confirm" => Some(Self::Confirm),
            _ => None,
        }
    }
}

pub type ActionCallback = Arc<dyn Fn(&Modal) + Send + Sync>;

/// One footer button.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModalAction {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: Option<ActionKind>,
    pub class: Option<String>,
    /// Rendered as the anchor's `href`.
    pub redirect: Option<String>,
    /// Browsing context for `redirect`, e.g. `_blank`.
    pub target: Option<String>,
    #[serde(skip)]
    pub callback: Option<ActionCallback>,
}

impl ModalAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn close(label: impl Into<String>) -> Self {
        Self::new(label).kind(ActionKind::Close)
    }

    pub fn cancel(label: impl Into<String>) -> Self {
        Self::new(label).kind(ActionKind::Cancel)
    }

    pub fn confirm(label: impl Into<String>) -> Self {
        Self::new(label).kind(ActionKind::Confirm)
    }

    pub fn kind(mut self, kind: ActionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn redirect(mut self, href: impl Into<String>) -> Self {
        self.redirect = Some(href.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Modal) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalAction")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("class", &self.class)
            .field("redirect", &self.redirect)
            .field("target", &self.target)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalClasses {
    pub host: String,
    pub body: String,
    /// Added while opening and kept while open.
    pub enter: String,
    /// Added while closing.
    pub leave: String,
    pub backdrop: String,
}

impl Default for ModalClasses {
    fn default() -> Self {
        Self {
            host: "modal".into(),
            body: "modal-body".into(),
            enter: "modal-enter".into(),
            leave: "modal-leave".into(),
            backdrop: "modal-backdrop".into(),
        }
    }
}

/// Resolved configuration of a [`Modal`].
#[derive(Debug, Clone)]
pub struct ModalConfig {
    /// Element the modal is mounted into; the document body when unset.
    pub host: Option<NodeId>,
    pub title: Option<String>,
    /// Markup rendered into the content section.
    pub content: String,
    pub animation: bool,
    /// Close when the backdrop is clicked.
    pub autoclose: bool,
    pub classes: ModalClasses,
    pub event: String,
    pub actions: Vec<ModalAction>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            host: None,
            title: None,
            content: String::new(),
            animation: true,
            autoclose: true,
            classes: ModalClasses::default(),
            event: "click".into(),
            actions: Vec::new(),
        }
    }
}

impl ModalConfig {
    pub fn merged(&self, options: &ModalOptions) -> Self {
        let mut config = self.clone();
        if options.host.is_some() {
            config.host = options.host;
        }
        if let Some(title) = &options.title {
            config.title = Some(title.clone());
        }
        if let Some(content) = &options.content {
            config.content = content.clone();
        }
        if let Some(animation) = options.animation {
            config.animation = animation;
        }
        if let Some(autoclose) = options.autoclose {
            config.autoclose = autoclose;
        }
        if let Some(classes) = &options.classes {
            let target = &mut config.classes;
            for (value, slot) in [
                (&classes.host, &mut target.host),
                (&classes.body, &mut target.body),
                (&classes.enter, &mut target.enter),
                (&classes.leave, &mut target.leave),
                (&classes.backdrop, &mut target.backdrop),
            ] {
                if let Some(value) = value {
                    *slot = value.clone();
                }
            }
        }
        if let Some(event) = &options.event {
            config.event = event.clone();
        }
        if let Some(actions) = &options.actions {
            config.actions = actions.clone();
        }
        config
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalClassOptions {
    pub host: Option<String>,
    pub body: Option<String>,
    pub enter: Option<String>,
    pub leave: Option<String>,
    pub backdrop: Option<String>,
}

/// Partial configuration; unset fields keep the defaults they are merged into.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModalOptions {
    #[serde(skip)]
    pub host: Option<NodeId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub animation: Option<bool>,
    pub autoclose: Option<bool>,
    pub classes: Option<ModalClassOptions>,
    pub event: Option<String>,
    pub actions: Option<Vec<ModalAction>>,
}

impl ModalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: NodeId) -> Self {
        self.host = Some(host);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, markup: impl Into<String>) -> Self {
        self.content = Some(markup.into());
        self
    }

    pub fn animation(mut self, animation: bool) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn autoclose(mut self, autoclose: bool) -> Self {
        self.autoclose = Some(autoclose);
        self
    }

    pub fn classes(mut self, classes: ModalClassOptions) -> Self {
        self.classes = Some(classes);
        self
    }

    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn action(mut self, action: ModalAction) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(action);
        self
    }
}
