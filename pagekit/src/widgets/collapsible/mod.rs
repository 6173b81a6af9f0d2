//! Expandable title/content sections.
//!
//! A [`Collapsible`] takes over a host element holding repeated title and
//! content elements. Titles toggle their content; expanding animates the
//! content height from zero to its natural height and collapsing animates
//! back to zero, both driven by the height transition declared for the
//! content.
//!
//! # Example
//!
//! ```ignore
//! let faq = Collapsible::new(&document, host, &CollapsibleOptions::new().accordion(true))?;
//! faq.on(EXPAND, |item| println!("opened {}", item.index));
//! faq.expand(0).await?;
//! ```

mod config;
mod events;
mod state;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::FutureExt;
use log::{debug, warn};
use pagedom::{Document, Height, NodeId, SelectorList, TransitionProperty};

pub use self::config::{
    ClassOptions, CollapsibleClasses, CollapsibleConfig, CollapsibleOptions, CollapsibleSelectors,
    SelectorOptions,
};
pub use self::state::CollapsibleSnapshot;
use self::state::{CollapsibleState, Item, Ticket, Transition};
use crate::emitter::{Emits, EventEmitter};
use crate::transition::TransitionWatch;
use crate::{Error, Result, WidgetDefaults};

pub const EXPAND: &str = "expand";
pub const COLLAPSE: &str = "collapse";

struct Inner {
    document: Document,
    host: NodeId,
    config: CollapsibleConfig,
    titles: SelectorList,
    contents: SelectorList,
    emitter: EventEmitter<CollapsibleSnapshot>,
    state: Mutex<CollapsibleState>,
}

/// Handle to a collapsible host. Clones share the same widget.
#[derive(Clone)]
pub struct Collapsible {
    inner: Arc<Inner>,
}

enum Step {
    Done(CollapsibleSnapshot),
    Wait(Transition),
    Run(Transition),
}

impl Collapsible {
    pub fn new(document: &Document, host: NodeId, options: &CollapsibleOptions) -> Result<Self> {
        Self::with_config(document, host, CollapsibleConfig::default().merged(options))
    }

    /// Build from the process defaults patched with `options`.
    pub fn with_defaults(
        document: &Document,
        host: NodeId,
        defaults: &WidgetDefaults,
        options: &CollapsibleOptions,
    ) -> Result<Self> {
        Self::with_config(document, host, defaults.collapsible.merged(options))
    }

    pub fn with_config(document: &Document, host: NodeId, config: CollapsibleConfig) -> Result<Self> {
        if !document.exists(host) {
            return Err(Error::MissingElement(format!("collapsible host {host:?}")));
        }
        if config.event.trim().is_empty() {
            return Err(Error::Configuration("event type must not be empty".into()));
        }
        if config.classes.active.trim().is_empty() {
            return Err(Error::Configuration("active class must not be empty".into()));
        }
        let titles = parse_selector(&config.selectors.title)?;
        let contents = parse_selector(&config.selectors.content)?;
        let items = discover(document, host, &titles, &contents, &config.classes.active)?;

        let collapsible = Self {
            inner: Arc::new(Inner {
                document: document.clone(),
                host,
                config,
                titles,
                contents,
                emitter: EventEmitter::new(),
                state: Mutex::new(CollapsibleState {
                    items,
                    ..Default::default()
                }),
            }),
        };
        collapsible.apply_indexes()?;
        collapsible.bind()?;
        debug!("collapsible on {host:?} with {} item(s)", collapsible.len());
        Ok(collapsible)
    }

    fn state(&self) -> MutexGuard<'_, CollapsibleState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the item is expanded or expanding.
    pub fn is_expanded(&self, index: usize) -> Result<bool> {
        Ok(self.state().check(index)?.expanded)
    }

    pub fn snapshot(&self, index: usize) -> Result<CollapsibleSnapshot> {
        let state = self.state();
        state.check(index)?;
        Ok(state.snapshot(index))
    }

    pub fn expanded_indexes(&self) -> Vec<usize> {
        self.state()
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| item.expanded.then_some(i))
            .collect()
    }

    pub fn host(&self) -> NodeId {
        self.inner.host
    }

    pub fn config(&self) -> &CollapsibleConfig {
        &self.inner.config
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    pub fn is_destroyed(&self) -> bool {
        self.state().destroyed
    }

    // -------------------------------------------------------------------------
    // Animated operations
    // -------------------------------------------------------------------------

    /// Expand a collapsed item or collapse an expanded one. While the item is
    /// animating this resolves with the running animation instead.
    pub async fn toggle(&self, index: usize) -> Result<CollapsibleSnapshot> {
        let (expanded, in_flight) = {
            let state = self.state();
            let expanded = state.check(index)?.expanded;
            (expanded, state.in_flight(index))
        };
        if let Some(transition) = in_flight {
            return transition.await;
        }
        if expanded {
            self.collapse(index).await
        } else {
            self.expand(index).await
        }
    }

    /// Expand the item and wait for the height animation. In accordion mode
    /// every other open item is collapsed first.
    pub async fn expand(&self, index: usize) -> Result<CollapsibleSnapshot> {
        loop {
            let step = {
                let mut state = self.state();
                let expanded = state.check(index)?.expanded;
                if let Some(transition) = state.in_flight(index) {
                    Step::Wait(transition)
                } else if expanded {
                    Step::Done(state.snapshot(index))
                } else if let Some(other) = self
                    .inner
                    .config
                    .accordion
                    .then(|| state.other_open(index))
                    .flatten()
                {
                    match state.in_flight(other) {
                        Some(transition) => Step::Wait(transition),
                        None => Step::Wait(self.begin(&mut state, other, false)),
                    }
                } else {
                    Step::Run(self.begin(&mut state, index, true))
                }
            };
            match step {
                Step::Done(snapshot) => return Ok(snapshot),
                Step::Wait(transition) => {
                    let _ = transition.await;
                }
                Step::Run(transition) => return transition.await,
            }
        }
    }

    /// Collapse the item and wait for the height animation.
    pub async fn collapse(&self, index: usize) -> Result<CollapsibleSnapshot> {
        loop {
            let step = {
                let mut state = self.state();
                let expanded = state.check(index)?.expanded;
                if let Some(transition) = state.in_flight(index) {
                    Step::Wait(transition)
                } else if !expanded {
                    Step::Done(state.snapshot(index))
                } else {
                    Step::Run(self.begin(&mut state, index, false))
                }
            };
            match step {
                Step::Done(snapshot) => return Ok(snapshot),
                Step::Wait(transition) => {
                    let _ = transition.await;
                }
                Step::Run(transition) => return transition.await,
            }
        }
    }

    fn begin(&self, state: &mut CollapsibleState, index: usize, expanded: bool) -> Transition {
        let ticket = state.advance(index, expanded);
        let this = self.clone();
        let transition = async move { this.run(ticket, expanded).await }
            .boxed()
            .shared();
        state.in_flight.insert(ticket.title, transition.clone());
        transition
    }

    async fn run(&self, ticket: Ticket, expanded: bool) -> Result<CollapsibleSnapshot> {
        let outcome = self.animate(&ticket, expanded).await;
        let (current, destroyed, snapshot) = {
            let mut state = self.state();
            let current = state.is_current(&ticket);
            if current {
                state.in_flight.remove(&ticket.title);
            }
            (current, state.destroyed, state.snapshot_of(&ticket))
        };
        if destroyed {
            return Err(Error::Destroyed);
        }
        outcome?;
        if current {
            self.emit(expanded, &snapshot);
        } else {
            debug!("animation of item {} was superseded", snapshot.index);
        }
        Ok(snapshot)
    }

    async fn animate(&self, ticket: &Ticket, expanded: bool) -> Result<()> {
        let document = &self.inner.document;
        let config = &self.inner.config;
        let active = config.classes.active.as_str();
        let content = ticket.content;

        if expanded {
            document.add_class(ticket.title, active)?;
            document.add_class(content, active)?;
            if config.use_height {
                document.set_height(content, Height::Px(0))?;
                let natural = document.scroll_height(content);
                document.set_height(content, Height::Px(natural))?;
                TransitionWatch::new(document, content, TransitionProperty::Height)?
                    .settle()
                    .await;
                if !self.state().is_current(ticket) {
                    return Ok(());
                }
                document.set_height(content, Height::Auto)?;
            }
            return Ok(());
        }

        if config.use_height {
            let current = document.offset_height(content);
            document.set_height(content, Height::Px(current))?;
            document.set_height(content, Height::Px(0))?;
            TransitionWatch::new(document, content, TransitionProperty::Height)?
                .settle()
                .await;
            if !self.state().is_current(ticket) {
                return Ok(());
            }
        }
        document.remove_class(ticket.title, active)?;
        document.remove_class(content, active)?;
        if config.use_height {
            document.set_height(content, Height::Auto)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Direct operations
    // -------------------------------------------------------------------------

    /// Expand without animation. Supersedes a running animation of the item.
    pub fn expand_now(&self, index: usize) -> Result<()> {
        self.apply(index, true, true)
    }

    /// Collapse without animation. Supersedes a running animation of the item.
    pub fn collapse_now(&self, index: usize) -> Result<()> {
        self.apply(index, false, true)
    }

    pub fn toggle_now(&self, index: usize) -> Result<()> {
        let expanded = self.state().check(index)?.expanded;
        self.apply(index, !expanded, true)
    }

    fn apply(&self, index: usize, expanded: bool, emit: bool) -> Result<()> {
        if expanded && self.inner.config.accordion {
            loop {
                let other = {
                    let state = self.state();
                    state.check(index)?;
                    state.other_open(index)
                };
                match other {
                    Some(other) => self.apply(other, false, emit)?,
                    None => break,
                }
            }
        }

        let ticket = {
            let mut state = self.state();
            let item = state.check(index)?;
            if item.expanded == expanded && !state.in_flight.contains_key(&item.title) {
                return Ok(());
            }
            state.advance(index, expanded)
        };

        let document = &self.inner.document;
        let active = self.inner.config.classes.active.as_str();
        if expanded {
            document.add_class(ticket.title, active)?;
            document.add_class(ticket.content, active)?;
        } else {
            document.remove_class(ticket.title, active)?;
            document.remove_class(ticket.content, active)?;
        }
        if self.inner.config.use_height {
            document.set_height(ticket.content, Height::Auto)?;
        }

        if emit {
            let snapshot = self.state().snapshot_of(&ticket);
            self.emit(expanded, &snapshot);
        }
        Ok(())
    }

    fn apply_indexes(&self) -> Result<()> {
        let len = self.len();
        for &index in &self.inner.config.indexes {
            if index >= len {
                warn!("ignoring initial index {index}, there are {len} item(s)");
                continue;
            }
            self.apply(index, true, false)?;
        }
        Ok(())
    }

    fn emit(&self, expanded: bool, snapshot: &CollapsibleSnapshot) {
        let kind = if expanded { EXPAND } else { COLLAPSE };
        debug!("{kind} item {} on {:?}", snapshot.index, self.inner.host);
        self.inner.emitter.emit(kind, snapshot);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Re-read the items under the host. Items whose title survived keep
    /// their state unless `reset`, which collapses everything and expands
    /// the configured `indexes` again.
    pub fn refresh(&self, reset: bool) -> Result<()> {
        if self.is_destroyed() {
            return Err(Error::Destroyed);
        }
        let found = discover(
            &self.inner.document,
            self.inner.host,
            &self.inner.titles,
            &self.inner.contents,
            &self.inner.config.classes.active,
        )?;
        {
            let mut state = self.state();
            let items: Vec<Item> = found
                .into_iter()
                .map(|mut item| {
                    if let Some(previous) = state.position(item.title).map(|i| &state.items[i]) {
                        item.expanded = previous.expanded;
                        item.generation = previous.generation;
                    }
                    item
                })
                .collect();
            state
                .in_flight
                .retain(|title, _| items.iter().any(|item| item.title == *title));
            state.items = items;
        }

        if reset {
            for index in 0..self.len() {
                self.apply(index, false, false)?;
            }
            self.apply_indexes()?;
        }
        debug!("collapsible on {:?} refreshed, {} item(s)", self.inner.host, self.len());
        Ok(())
    }

    /// Detach the click listener and every subscriber. Nodes stay as they are.
    pub fn destroy(&self) {
        let listener = {
            let mut state = self.state();
            if state.destroyed {
                return;
            }
            state.destroyed = true;
            state.items.clear();
            state.in_flight.clear();
            state.listener.take()
        };
        if let Some(listener) = listener {
            self.inner.document.remove_listener(listener);
        }
        self.inner.emitter.remove_all_listeners();
        debug!("collapsible on {:?} destroyed", self.inner.host);
    }
}

impl Emits for Collapsible {
    type Payload = CollapsibleSnapshot;

    fn emitter(&self) -> &EventEmitter<CollapsibleSnapshot> {
        &self.inner.emitter
    }
}

impl fmt::Debug for Collapsible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collapsible")
            .field("host", &self.inner.host)
            .field("items", &self.len())
            .field("expanded", &self.expanded_indexes())
            .finish()
    }
}

fn parse_selector(source: &str) -> Result<SelectorList> {
    SelectorList::parse(source).map_err(|e| Error::Configuration(e.to_string()))
}

/// Pair title and content elements under `host` in document order.
fn discover(
    document: &Document,
    host: NodeId,
    titles: &SelectorList,
    contents: &SelectorList,
    active: &str,
) -> Result<Vec<Item>> {
    let found_titles = document.select_all(host, titles);
    let found_contents = document.select_all(host, contents);
    if found_titles.len() != found_contents.len() {
        return Err(Error::MissingElement(format!(
            "{} title(s) `{titles}` but {} content element(s) `{contents}` under {host:?}",
            found_titles.len(),
            found_contents.len(),
        )));
    }
    Ok(found_titles
        .into_iter()
        .zip(found_contents)
        .map(|(title, content)| Item {
            title,
            content,
            expanded: document.has_class(content, active),
            generation: 0,
        })
        .collect())
}
