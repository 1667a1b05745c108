//! Style flattener: rewrites a nested conditional style object into flat
//! properties whose values pick between alternatives through the hooks'
//! toggle pairs.
//!
//! For a hook `h` with identifier `id`, a branch value `b` and the value `o`
//! that applies outside the branch, the property becomes
//!
//! ```text
//! var(--id-1, b) var(--id-0, o)
//! ```
//!
//! Exactly one of the two references falls back at any time, the other is
//! valid and empty, so the property reads `b` while `h` is true and `o`
//! otherwise.
//!
//! The outside value `o` is looked up through a chain of frames, one per
//! nesting level, innermost first: the object currently being flattened
//! (including rewrites made by earlier sibling hooks), then each enclosing
//! object, then the configured fallback keyword.

use indexmap::IndexMap;
use log::debug;

use crate::compiler::CompiledHooks;
use crate::ident::Slot;
use crate::options::Options;
use crate::stringify::{Stringify, VarPassthrough};
use crate::style::{Properties, StyleObject, StyleValue};

/// A property during flattening.
#[derive(Clone, Debug)]
enum Cell<'style> {
    /// Rendered CSS text.
    Rendered(String),
    /// A value the stringifier rejected; carried through as-is.
    Inert(&'style StyleValue),
    /// A hook whose branch has not been merged yet.
    Hook(&'style StyleValue),
}

type Cells<'style> = IndexMap<String, Cell<'style>>;

/// One nesting level of the fallback chain.
struct Frame<'chain, 'style> {
    cells: &'chain Cells<'style>,
    outer: Option<&'chain Frame<'chain, 'style>>,
}

impl Frame<'_, '_> {
    /// Innermost rendered value of `property`.
    fn resolve(&self, property: &str) -> Option<&str> {
        match self.cells.get(property) {
            Some(Cell::Rendered(text)) => Some(text.as_str()),
            _ => self.outer.and_then(|outer| outer.resolve(property)),
        }
    }
}

/// Flattens style objects against a compiled hook configuration.
#[derive(Clone, Copy)]
pub struct Flattener<'hooks> {
    hooks: &'hooks CompiledHooks,
    options: Options,
    stringify: VarPassthrough<'hooks>,
}

impl<'hooks> Flattener<'hooks> {
    /// `var(...)` strings bypass `stringify`.
    pub fn new(
        hooks: &'hooks CompiledHooks,
        options: Options,
        stringify: &'hooks dyn Stringify,
    ) -> Self {
        Self {
            hooks,
            options,
            stringify: VarPassthrough(stringify),
        }
    }

    /// Flatten one style object. The input is not modified.
    pub fn flatten(&self, style: &StyleObject) -> Properties {
        self.flatten_level(style, None)
            .into_iter()
            .filter_map(|(property, cell)| match cell {
                Cell::Rendered(text) => Some((property, StyleValue::String(text))),
                Cell::Inert(value) => Some((property, value.clone())),
                Cell::Hook(_) => None,
            })
            .collect()
    }

    /// Merge `fragments` (see [`merge`]) and flatten the result once.
    pub fn flatten_all<'style>(
        &self,
        fragments: impl IntoIterator<Item = &'style StyleObject>,
    ) -> Properties {
        self.flatten(&merge(fragments, self.options.sort))
    }

    fn cell<'style>(&self, key: &str, value: &'style StyleValue) -> Cell<'style> {
        if self.hooks.contains(key) {
            return Cell::Hook(value);
        }
        self.stringify
            .stringify(key, value)
            .map_or(Cell::Inert(value), Cell::Rendered)
    }

    fn flatten_level<'style>(
        &self,
        style: &'style StyleObject,
        outer: Option<&Frame<'_, 'style>>,
    ) -> Cells<'style> {
        let mut cells: Cells<'style> = style
            .iter()
            .map(|(key, value)| (key.clone(), self.cell(key, value)))
            .collect();
        for (position, key) in style.keys().enumerate() {
            let pending = match cells.get(key) {
                Some(Cell::Hook(value)) => Some(*value),
                _ => None,
            };
            let Some(branch) = pending else {
                if self.options.sort {
                    move_to_end(&mut cells, key);
                }
                continue;
            };
            let hook_id = self.hooks.hook_id(key).unwrap_or_default();
            let merged = match branch {
                _ if !self.hooks.is_active(key) => {
                    debug!("Hook `{key}` has no toggle pair; ignoring its branch");
                    Cells::new()
                }
                StyleValue::Object(nested) => {
                    let frame = Frame {
                        cells: &cells,
                        outer,
                    };
                    self.flatten_level(nested, Some(&frame))
                }
                _ => {
                    debug!("Hook `{key}` does not map to a style object; ignoring it");
                    Cells::new()
                }
            };
            for (property, cell) in merged {
                let Cell::Rendered(when_true) = cell else {
                    continue;
                };
                if self.options.sort && declared_after(style, &property, position) {
                    continue;
                }
                let when_false = Frame {
                    cells: &cells,
                    outer,
                }
                .resolve(&property)
                .map_or_else(|| self.options.fallback.keyword().to_owned(), str::to_owned);
                let selected = format!(
                    "var({}, {when_true}) var({}, {when_false})",
                    Slot::True.property(hook_id),
                    Slot::False.property(hook_id)
                );
                if self.options.sort {
                    cells.shift_remove(&property);
                }
                cells.insert(property, Cell::Rendered(selected));
            }
            cells.shift_remove(key);
        }
        cells
    }
}

/// In sort mode a plain declaration after the hook overrides the hook's branch.
fn declared_after(style: &StyleObject, property: &str, hook_position: usize) -> bool {
    style
        .get_index_of(property)
        .is_some_and(|index| index > hook_position)
}

fn move_to_end(cells: &mut Cells<'_>, key: &str) {
    if let Some((name, cell)) = cells.shift_remove_entry(key) {
        cells.insert(name, cell);
    }
}

/// Shallow right-biased merge: a later fragment replaces an earlier
/// same-named key wholesale, hook branches included.
///
/// With `sort`, a replaced key moves to the position of its last declaration;
/// otherwise it keeps its first position.
pub fn merge<'style>(
    fragments: impl IntoIterator<Item = &'style StyleObject>,
    sort: bool,
) -> StyleObject {
    let mut merged = StyleObject::new();
    for fragment in fragments {
        for (key, value) in fragment {
            if sort {
                merged.shift_remove(key);
            }
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
