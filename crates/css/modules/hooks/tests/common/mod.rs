//! A tiny cascade model for the stylesheets the compiler emits.
//!
//! It understands exactly the shapes the compiler produces: one universal
//! rule of initializers followed by conditional rules (`prelude{decls}` or
//! `@at-rule{*{decls}}`). Matching a prelude applies its declarations over the
//! initializers. Custom properties are then resolved the way the cascade does:
//! `initial` is guaranteed-invalid, a `var()` to an invalid property takes its
//! fallback, and without a fallback the whole value is invalid.

use std::collections::HashMap;

use env_logger::Builder;

pub fn init_logging() {
    let _log_init: Result<(), _> = Builder::new().is_test(true).try_init();
}

/// Parsed stylesheet.
pub struct Cascade {
    initial: Vec<(String, String)>,
    rules: Vec<(String, Vec<(String, String)>)>,
}

/// Declared custom properties for one combination of matched rules.
pub struct Environment {
    declared: HashMap<String, String>,
}

fn declarations(body: &str) -> Vec<(String, String)> {
    body.split(';')
        .filter(|item| !item.is_empty())
        .filter_map(|item| item.split_once(':'))
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect()
}

impl Cascade {
    pub fn parse(css: &str) -> Self {
        let rest = css.strip_prefix("*{").unwrap_or(css);
        let (init_body, mut rest) = rest.split_once('}').unwrap_or((rest, ""));
        let mut rules = Vec::new();
        while let Some((prelude, after)) = rest.split_once('{') {
            let (body, tail) = if let Some(nested) = after.strip_prefix("*{") {
                nested.split_once("}}").unwrap_or((nested, ""))
            } else {
                after.split_once('}').unwrap_or((after, ""))
            };
            rules.push((prelude.to_owned(), declarations(body)));
            rest = tail;
        }
        Self {
            initial: declarations(init_body),
            rules,
        }
    }

    /// Preludes of every conditional rule, in order.
    pub fn preludes(&self) -> Vec<&str> {
        self.rules.iter().map(|(prelude, _)| prelude.as_str()).collect()
    }

    /// Environment where exactly the rules whose prelude is in `matched` apply.
    pub fn with_matched(&self, matched: &[&str]) -> Environment {
        let mut declared: HashMap<String, String> = self.initial.iter().cloned().collect();
        for (prelude, decls) in &self.rules {
            if matched.contains(&prelude.as_str()) {
                declared.extend(decls.iter().cloned());
            }
        }
        Environment { declared }
    }
}

impl Environment {
    /// Computed value of a custom property; `None` when guaranteed-invalid.
    pub fn custom(&self, name: &str) -> Option<String> {
        self.resolve(name, &mut Vec::new())
    }

    /// Whether the hook `id` is currently true. Panics unless exactly one
    /// member of its toggle pair is valid.
    pub fn hook_is_true(&self, id: &str) -> bool {
        let off = self.custom(&format!("--{id}-0"));
        let on = self.custom(&format!("--{id}-1"));
        assert!(
            off.is_some() != on.is_some(),
            "toggle pair of `{id}` must have exactly one valid member (0: {off:?}, 1: {on:?})"
        );
        off.is_some()
    }

    /// Value of a property after `var()` substitution, whitespace-collapsed.
    pub fn evaluate(&self, value: &str) -> Option<String> {
        self.substitute(value, &mut Vec::new())
            .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    fn resolve(&self, name: &str, stack: &mut Vec<String>) -> Option<String> {
        let raw = self.declared.get(name)?;
        if raw.trim() == "initial" || stack.iter().any(|seen| seen == name) {
            return None;
        }
        stack.push(name.to_owned());
        let resolved = self.substitute(raw, stack);
        stack.pop();
        resolved
    }

    fn substitute(&self, text: &str, stack: &mut Vec<String>) -> Option<String> {
        let mut out = String::new();
        let mut rest = text;
        while let Some(start) = rest.find("var(") {
            out.push_str(&rest[..start]);
            let args_start = start + "var(".len();
            let close = matching_paren(rest, args_start)?;
            let args = &rest[args_start..close];
            let (name, fallback) = split_first_argument(args);
            let replacement = match self.resolve(name.trim(), stack) {
                Some(value) => value,
                None => self.substitute(fallback?, stack)?,
            };
            out.push_str(&replacement);
            rest = &rest[close + 1..];
        }
        out.push_str(rest);
        Some(out)
    }
}

/// Index of the `)` closing the group whose content starts at `from`.
fn matching_paren(text: &str, from: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for (offset, character) in text[from..].char_indices() {
        match character {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(from + offset),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Split `var()` arguments at the first top-level comma.
fn split_first_argument(args: &str) -> (&str, Option<&str>) {
    let mut depth = 0_usize;
    for (offset, character) in args.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return (&args[..offset], Some(&args[offset + 1..])),
            _ => {}
        }
    }
    (args, None)
}
