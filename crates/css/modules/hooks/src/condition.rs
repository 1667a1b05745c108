//! Hook conditions: the selectors and at-rules a hook is bound to, and the
//! AND/OR trees that combine them.

use log::warn;
use serde::de::Error as _;
use serde::ser::SerializeMap as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// At-rule preludes accepted as leaf conditions. The trailing space is significant.
const AT_RULE_PREFIXES: [&str; 3] = ["@media ", "@container ", "@supports "];

/// Stands in for the styled element inside combinator leaves.
pub const ELEMENT_PLACEHOLDER: char = '&';

/// Shape of a leaf condition, in the order leaves are classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// A selector containing `&`, e.g. `.dark &` or `&:has(:focus)`.
    Combinator,
    /// A selector starting with `:`, e.g. `:hover`.
    Pseudo,
    /// `@media`, `@container` or `@supports` followed by its condition.
    AtRule,
}

impl LeafKind {
    /// Classify leaf text, returning `None` when it matches no known shape.
    pub fn classify(text: &str) -> Option<Self> {
        if text.contains(ELEMENT_PLACEHOLDER) {
            Some(Self::Combinator)
        } else if text.starts_with(':') {
            Some(Self::Pseudo)
        } else if AT_RULE_PREFIXES
            .iter()
            .any(|prefix| text.starts_with(prefix))
        {
            Some(Self::AtRule)
        } else {
            None
        }
    }
}

/// Boolean operator of a composite condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Or,
    And,
}

impl Operator {
    /// Key used for this operator in the JSON form.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
        }
    }
}

/// A hook condition.
///
/// Leaves carry their raw text; whether that text is a recognized shape is
/// checked by [`Condition::is_valid`] rather than at construction, so that a
/// bad entry can be carried through a configuration and skipped later.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Leaf(String),
    Or(Vec<Condition>),
    And(Vec<Condition>),
}

impl Condition {
    /// Build a leaf condition.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Build a composite from an operator and its operands.
    pub fn composite(operator: Operator, children: Vec<Self>) -> Self {
        match operator {
            Operator::Or => Self::Or(children),
            Operator::And => Self::And(children),
        }
    }

    /// Operator and operands of a composite, `None` for leaves.
    pub fn as_composite(&self) -> Option<(Operator, &[Self])> {
        match self {
            Self::Leaf(_) => None,
            Self::Or(children) => Some((Operator::Or, children)),
            Self::And(children) => Some((Operator::And, children)),
        }
    }

    /// Whether every leaf in the tree has a recognized shape and every
    /// composite has at least one operand.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Leaf(text) => LeafKind::classify(text).is_some(),
            Self::Or(children) | Self::And(children) => {
                !children.is_empty() && children.iter().all(Self::is_valid)
            }
        }
    }

    /// Rewrite every composite with more than two operands into a left-deep
    /// binary chain: `op[s0, s1, .., sn]` becomes `op[s0, op[s1, .., sn]]`.
    /// A single-operand composite collapses to its operand.
    pub fn normalize(self) -> Self {
        match self {
            Self::Leaf(_) => self,
            Self::Or(children) => Self::rebalance(Operator::Or, children),
            Self::And(children) => Self::rebalance(Operator::And, children),
        }
    }

    fn rebalance(operator: Operator, mut children: Vec<Self>) -> Self {
        if children.len() == 1
            && let Some(only) = children.pop()
        {
            return only.normalize();
        }
        if children.len() <= 2 {
            return Self::composite(operator, children.into_iter().map(Self::normalize).collect());
        }
        let first = children.remove(0).normalize();
        Self::composite(operator, vec![first, Self::rebalance(operator, children)])
    }

    /// Number of composite levels above the deepest leaf.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Or(children) | Self::And(children) => {
                children.iter().map(Self::depth).max().unwrap_or(0) + 1
            }
        }
    }

    /// Leaf texts in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'tree>(&'tree self, out: &mut Vec<&'tree str>) {
        match self {
            Self::Leaf(text) => out.push(text),
            Self::Or(children) | Self::And(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Canonical JSON text: leaves as strings, composites as `{"or":[..]}` or `{"and":[..]}`.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode a condition from JSON.
    ///
    /// Any string is accepted as a leaf. Objects must carry exactly one of
    /// `or`/`and` holding an array of conditions. Everything else is rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Leaf(text.clone())),
            Value::Object(map) => {
                let (operator, operands) = match (map.get("or"), map.get("and")) {
                    (Some(operands), None) => (Operator::Or, operands),
                    (None, Some(operands)) => (Operator::And, operands),
                    (Some(_), Some(_)) => {
                        warn!("Hook condition mixes `or` and `and` in one node: {value}");
                        return None;
                    }
                    (None, None) => return None,
                };
                let children = operands
                    .as_array()?
                    .iter()
                    .map(Self::from_json)
                    .collect::<Option<Vec<_>>>()?;
                Some(Self::composite(operator, children))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => None,
        }
    }
}

impl From<&str> for Condition {
    fn from(text: &str) -> Self {
        Self::leaf(text)
    }
}

impl From<String> for Condition {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(text) => serializer.serialize_str(text),
            Self::Or(children) => serialize_composite(serializer, Operator::Or, children),
            Self::And(children) => serialize_composite(serializer, Operator::And, children),
        }
    }
}

fn serialize_composite<S: Serializer>(
    serializer: S,
    operator: Operator,
    children: &[Condition],
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(operator.key(), children)?;
    map.end()
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| D::Error::custom(format!("unrecognized hook condition: {value}")))
    }
}
