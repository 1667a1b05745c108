//! Conditional style hooks: state-dependent inline styles driven entirely by the cascade.
//!
//! A hook is a named condition (`:hover`, `@media (width >= 600px)`,
//! `.dark &`, or an AND/OR of other hooks). Compiling a hook configuration
//! yields a small stylesheet, inserted once, that keeps a pair of custom
//! properties per hook in sync with the condition. Flattening a style object
//! that nests values under hook names then produces plain properties whose
//! `var()` fallbacks select the right value without any script running when
//! the condition changes.
//!
//! ```
//! use css_hooks::{HookConfig, Hooks, StyleValue, style_from_json};
//! use serde_json::json;
//!
//! let hooks = Hooks::builder(HookConfig::new().with("hover", ":hover"))
//!     .ids(|name: &str| name.to_owned())
//!     .build();
//! assert_eq!(
//!     hooks.css_text(),
//!     "*{--hover-0:initial;--hover-1: ;}:hover{--hover-0: ;--hover-1:initial;}"
//! );
//!
//! let style = style_from_json(json!({"color": "black", "hover": {"color": "blue"}}))
//!     .unwrap_or_default();
//! let flat = hooks.css(&style);
//! assert_eq!(
//!     flat.get("color").and_then(StyleValue::as_str),
//!     Some("var(--hover-1, blue) var(--hover-0, black)")
//! );
//! ```

#![forbid(unsafe_code)]

mod compiler;
mod condition;
mod config;
mod flatten;
mod ident;
mod options;
mod recommended;
mod stringify;
mod style;

use log::debug;

pub use compiler::{CompiledHooks, compile};
pub use condition::{Condition, ELEMENT_PLACEHOLDER, LeafKind, Operator};
pub use config::HookConfig;
pub use flatten::{Flattener, merge};
pub use ident::{
    DebugIds, HashIds, IdStrategy, Slot, condition_hash, sanitize_hook_name, string_hash,
};
pub use options::{Fallback, Options};
pub use recommended::recommended;
pub use stringify::{
    GenericStringify, PixelStringify, Stringify, VarPassthrough, format_number, is_unitless,
};
pub use style::{Properties, StyleObject, StyleValue, style_from_json, style_to_json};

/// A compiled hook configuration together with the transform that uses it.
///
/// Immutable once built; share it across threads and call [`Hooks::css`] per render.
pub struct Hooks {
    compiled: CompiledHooks,
    options: Options,
    stringify: Box<dyn Stringify + Send + Sync>,
}

impl Hooks {
    /// Start configuring a hooks instance for `config`.
    pub fn builder(config: HookConfig) -> HooksBuilder {
        HooksBuilder::new(config)
    }

    /// Stylesheet text to insert once per document.
    pub fn css_text(&self) -> &str {
        self.compiled.css_text()
    }

    /// Identifier of the hook `name`.
    pub fn hook_id(&self, name: &str) -> Option<&str> {
        self.compiled.hook_id(name)
    }

    pub const fn compiled(&self) -> &CompiledHooks {
        &self.compiled
    }

    pub const fn options(&self) -> Options {
        self.options
    }

    /// Flattener bound to this configuration.
    pub fn flattener(&self) -> Flattener<'_> {
        Flattener::new(&self.compiled, self.options, &*self.stringify)
    }

    /// Flatten one conditional style object.
    pub fn css(&self, style: &StyleObject) -> Properties {
        self.flattener().flatten(style)
    }

    /// Merge several fragments, later ones winning per key, then flatten.
    pub fn css_all<'style>(
        &self,
        fragments: impl IntoIterator<Item = &'style StyleObject>,
    ) -> Properties {
        self.flattener().flatten_all(fragments)
    }
}

/// Builder for [`Hooks`].
pub struct HooksBuilder {
    config: HookConfig,
    options: Options,
    ids: Option<Box<dyn IdStrategy>>,
    stringify: Box<dyn Stringify + Send + Sync>,
}

impl HooksBuilder {
    pub fn new(config: HookConfig) -> Self {
        Self {
            config,
            options: Options::default(),
            ids: None,
            stringify: Box::new(GenericStringify),
        }
    }

    /// Replace all options at once.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.options.fallback = fallback;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: bool) -> Self {
        self.options.sort = sort;
        self
    }

    /// Readable identifiers. Ignored when [`HooksBuilder::ids`] is set.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = debug;
        self
    }

    /// Use a custom identifier strategy instead of the hash-based ones.
    #[must_use]
    pub fn ids(mut self, ids: impl IdStrategy + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Use a custom value stringifier. `var(...)` strings never reach it.
    #[must_use]
    pub fn stringify(mut self, stringify: impl Stringify + Send + Sync + 'static) -> Self {
        self.stringify = Box::new(stringify);
        self
    }

    /// Compile the configuration.
    pub fn build(self) -> Hooks {
        let compiled = match self.ids {
            Some(ids) => compile(&self.config, &*ids),
            None if self.options.debug => compile(&self.config, &DebugIds),
            None => compile(&self.config, &HashIds),
        };
        debug!(
            "Compiled {} hooks into {} bytes of CSS",
            self.config.len(),
            compiled.css_text().len()
        );
        Hooks {
            compiled,
            options: self.options,
            stringify: self.stringify,
        }
    }
}

/// Compile `config` with default options and the generic stringifier.
pub fn create_hooks(config: HookConfig) -> Hooks {
    Hooks::builder(config).build()
}
