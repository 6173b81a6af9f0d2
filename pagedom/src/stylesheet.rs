use slotmap::SlotMap;

use crate::element::{Node, NodeId};
use crate::selector::SelectorList;
use crate::types::{ComputedStyle, Style};

#[derive(Debug, Clone)]
pub struct Rule {
    pub selector: SelectorList,
    pub style: Style,
}

/// Ordered rule list. Later matching rules override earlier ones and the
/// inline style overrides every rule; there is no specificity ordering.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn compute(&self, nodes: &SlotMap<NodeId, Node>, node: NodeId) -> ComputedStyle {
        let Some(element) = nodes.get(node).and_then(Node::element) else {
            return ComputedStyle::default();
        };

        let mut style = Style::default();
        for rule in &self.rules {
            if rule.selector.matches(nodes, node) {
                style.apply(&rule.style);
            }
        }
        style.apply(&element.style);
        style.into()
    }
}
