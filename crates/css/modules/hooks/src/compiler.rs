//! Condition compiler: turns a hook configuration into the stylesheet that
//! drives every hook's toggle pair, and records the identifier of each hook.
//!
//! The stylesheet is one universal rule holding every initializer, followed
//! by one conditional rule per leaf hook:
//!
//! ```css
//! *{--h-0:initial;--h-1: ;}
//! :hover{--h-0: ;--h-1:initial;}
//! ```
//!
//! Composite hooks get no rule. Their pair is derived from their operands'
//! pairs with `var()` fallbacks, so the cascade evaluates AND/OR by itself.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::condition::{Condition, ELEMENT_PLACEHOLDER, LeafKind, Operator};
use crate::config::HookConfig;
use crate::ident::{IdStrategy, Slot};

/// Output of [`compile`]: stylesheet text and the identifier of every hook.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledHooks {
    css: String,
    ids: IndexMap<String, String>,
    /// Hooks whose condition was rejected and emitted no CSS.
    inert: IndexSet<String>,
}

impl CompiledHooks {
    /// Stylesheet text, to be inserted once per document.
    pub fn css_text(&self) -> &str {
        &self.css
    }

    /// Identifier assigned to `name`, if it is a configured hook.
    pub fn hook_id(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    /// Whether `name` is a configured hook, including hooks whose condition
    /// was rejected.
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Whether `name` is a configured hook that emitted its toggle pair.
    ///
    /// A rejected hook declares no custom properties, so both members of its
    /// pair are guaranteed-invalid and it must not be referenced.
    pub fn is_active(&self, name: &str) -> bool {
        self.contains(name) && !self.inert.contains(name)
    }

    /// Hook names and identifiers in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids
            .iter()
            .map(|(name, hook_id)| (name.as_str(), hook_id.as_str()))
    }
}

/// Accumulated stylesheet pieces.
#[derive(Default)]
struct Emitted {
    /// Declarations for the universal rule.
    init: String,
    /// Conditional rules, one per leaf.
    rules: String,
}

/// Compile `config`, naming hooks with `ids`.
///
/// Conditions are normalized to binary trees before naming and emission. A
/// hook whose condition is not valid emits nothing but keeps its identifier.
pub fn compile(config: &HookConfig, ids: &dyn IdStrategy) -> CompiledHooks {
    let mut emitted = Emitted::default();
    let mut assigned = IndexMap::with_capacity(config.len());
    let mut inert = IndexSet::new();
    for (name, condition) in config.iter() {
        let normalized = condition.clone().normalize();
        let hook_id = ids.hook_id(name, &normalized);
        if normalized.is_valid() {
            emit(&hook_id, &normalized, &mut emitted);
        } else {
            debug!(
                "Hook `{name}` has an unrecognized condition {}; its branches will be ignored",
                normalized.to_json_string()
            );
            inert.insert(name.to_owned());
        }
        assigned.insert(name.to_owned(), hook_id);
    }
    CompiledHooks {
        css: format!("*{{{}}}{}", emitted.init, emitted.rules),
        ids: assigned,
        inert,
    }
}

fn emit(hook_id: &str, condition: &Condition, out: &mut Emitted) {
    if let Condition::Leaf(text) = condition {
        emit_leaf(hook_id, text, out);
        return;
    }
    // Normalized and valid: every composite has exactly two operands.
    let Some((operator, [left, right])) = condition.as_composite() else {
        return;
    };
    let left_id = format!("{hook_id}A");
    let right_id = format!("{hook_id}B");
    emit(&left_id, left, out);
    emit(&right_id, right, out);
    out.init
        .push_str(&composite_init(operator, hook_id, &left_id, &right_id));
}

fn emit_leaf(hook_id: &str, text: &str, out: &mut Emitted) {
    let Some(kind) = LeafKind::classify(text) else {
        return;
    };
    let matched = toggle(hook_id, Toggle::Matched);
    let rule = match kind {
        LeafKind::Combinator => {
            let selector = text.replace(ELEMENT_PLACEHOLDER, "*");
            format!("{selector}{{{matched}}}")
        }
        LeafKind::Pseudo => format!("{text}{{{matched}}}"),
        LeafKind::AtRule => format!("{text}{{*{{{matched}}}}}"),
    };
    out.init.push_str(&toggle(hook_id, Toggle::Resting));
    out.rules.push_str(&rule);
}

#[derive(Clone, Copy)]
enum Toggle {
    Resting,
    Matched,
}

/// Declarations setting a leaf's pair to false (`Resting`) or true (`Matched`).
fn toggle(hook_id: &str, state: Toggle) -> String {
    let (off, on) = match state {
        Toggle::Resting => ("initial", " "),
        Toggle::Matched => (" ", "initial"),
    };
    format!(
        "{}:{off};{}:{on};",
        Slot::False.property(hook_id),
        Slot::True.property(hook_id)
    )
}

/// Initializer for a binary composite.
///
/// A `var()` chain with fallbacks is valid if any link is valid; a
/// space-joined pair of references is valid only if both are. With the
/// false slot valid exactly while the hook is true:
///
/// * OR: false slot = any operand's false slot, true slot = both true slots.
/// * AND: false slot = both false slots, true slot = any operand's true slot.
fn composite_init(operator: Operator, hook_id: &str, left_id: &str, right_id: &str) -> String {
    let either = |slot: Slot| {
        format!(
            "var({},var({}))",
            slot.property(left_id),
            slot.property(right_id)
        )
    };
    let both = |slot: Slot| {
        format!(
            "var({}) var({})",
            slot.property(left_id),
            slot.property(right_id)
        )
    };
    let (off, on) = match operator {
        Operator::Or => (either(Slot::False), both(Slot::True)),
        Operator::And => (both(Slot::False), either(Slot::True)),
    };
    format!(
        "{}:{off};{}:{on};",
        Slot::False.property(hook_id),
        Slot::True.property(hook_id)
    )
}
