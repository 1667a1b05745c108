//! Command-line front end for `css_hooks`.
//!
//! ```text
//! css-hooks compile <config.json> [--debug] [--fallback unset|revert-layer]
//! css-hooks flatten <config.json> <style.json>... [--sort] [--debug] [--fallback ...] [--px]
//! css-hooks recommended
//! ```
//!
//! A configuration file is either a bare `name -> condition` object or
//! `{"hooks": {...}, "options": {...}}`. Flags override file options.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow, bail};
use css_hooks::{
    Condition, Fallback, HookConfig, Hooks, Options, PixelStringify, StyleObject, recommended,
    style_from_json, style_to_json,
};
use log::debug;
use serde::Deserialize as _;
use serde_json::Value;

pub const USAGE: &str = "\
usage:
  css-hooks compile <config.json> [--debug] [--fallback unset|revert-layer]
  css-hooks flatten <config.json> <style.json>... [--sort] [--debug] [--fallback unset|revert-layer] [--px]
  css-hooks recommended";

/// Option values given on the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub fallback: Option<Fallback>,
    pub sort: Option<bool>,
    pub debug: Option<bool>,
    /// Render numbers as pixel lengths.
    pub pixels: bool,
}

impl Overrides {
    fn apply(&self, options: Options) -> Options {
        Options {
            fallback: self.fallback.unwrap_or(options.fallback),
            sort: self.sort.unwrap_or(options.sort),
            debug: self.debug.unwrap_or(options.debug),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Compile {
        config: PathBuf,
        overrides: Overrides,
    },
    Flatten {
        config: PathBuf,
        styles: Vec<PathBuf>,
        overrides: Overrides,
    },
    Recommended,
    Help,
}

impl Command {
    /// Parse the arguments following the program name.
    ///
    /// # Errors
    /// Returns an error for unknown commands or flags and for missing operands.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let Some(name) = args.next() else {
            return Ok(Self::Help);
        };
        let mut overrides = Overrides::default();
        let mut positional = Vec::new();
        while let Some(arg) = args.next() {
            if let Some(keyword) = arg.strip_prefix("--fallback=") {
                overrides.fallback = Some(parse_fallback(keyword)?);
                continue;
            }
            match arg.as_str() {
                "--debug" => overrides.debug = Some(true),
                "--sort" => overrides.sort = Some(true),
                "--px" => overrides.pixels = true,
                "--fallback" => {
                    let keyword = args
                        .next()
                        .ok_or_else(|| anyhow!("`--fallback` needs a keyword"))?;
                    overrides.fallback = Some(parse_fallback(&keyword)?);
                }
                flag if flag.starts_with("--") => bail!("Unknown flag `{flag}`\n\n{USAGE}"),
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        match name.as_str() {
            "compile" => match <[PathBuf; 1]>::try_from(positional) {
                Ok([config]) => Ok(Self::Compile { config, overrides }),
                Err(_) => bail!("`compile` takes exactly one configuration file\n\n{USAGE}"),
            },
            "flatten" => {
                if positional.len() < 2 {
                    bail!("`flatten` takes a configuration file and at least one style file\n\n{USAGE}");
                }
                let config = positional.remove(0);
                Ok(Self::Flatten {
                    config,
                    styles: positional,
                    overrides,
                })
            }
            "recommended" if positional.is_empty() => Ok(Self::Recommended),
            "recommended" => bail!("`recommended` takes no operands\n\n{USAGE}"),
            "help" | "--help" | "-h" => Ok(Self::Help),
            other => bail!("Unknown command `{other}`\n\n{USAGE}"),
        }
    }
}

fn parse_fallback(keyword: &str) -> Result<Fallback> {
    Fallback::from_keyword(keyword)
        .ok_or_else(|| anyhow!("Unknown fallback `{keyword}`, expected `unset` or `revert-layer`"))
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Split a configuration document into hooks and options.
///
/// The wrapped form is recognised when the document has only `hooks` and
/// `options` keys and `hooks` is an object that is not itself a condition.
///
/// # Errors
/// Returns an error if the document is not an object or `options` is malformed.
pub fn parse_config(document: &Value) -> Result<(HookConfig, Options)> {
    let wrapped = document
        .as_object()
        .filter(|map| map.keys().all(|key| key == "hooks" || key == "options"))
        .and_then(|map| map.get("hooks"))
        .filter(|hooks| hooks.is_object() && Condition::from_json(hooks).is_none());
    let Some(hooks) = wrapped else {
        return Ok((HookConfig::from_json_value(document)?, Options::default()));
    };
    let options = match document.get("options") {
        Some(options) => Options::deserialize(options).context("Invalid `options`")?,
        None => Options::default(),
    };
    Ok((HookConfig::from_json_value(hooks)?, options))
}

/// Read and parse a configuration file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<(HookConfig, Options)> {
    parse_config(&read_json(path)?).with_context(|| format!("In {}", path.display()))
}

/// Read a style object file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a JSON object.
pub fn load_style(path: &Path) -> Result<StyleObject> {
    style_from_json(read_json(path)?)
        .ok_or_else(|| anyhow!("{} does not contain a JSON object", path.display()))
}

fn build_hooks(path: &Path, overrides: &Overrides) -> Result<Hooks> {
    let (config, options) = load_config(path)?;
    let options = overrides.apply(options);
    debug!(
        "Loaded {} hooks from {} with {options:?}",
        config.len(),
        path.display()
    );
    let builder = Hooks::builder(config).options(options);
    Ok(if overrides.pixels {
        builder.stringify(PixelStringify).build()
    } else {
        builder.build()
    })
}

/// Execute `command`, writing its result to `out`.
///
/// # Errors
/// Returns an error if an input file is unusable or writing fails.
pub fn run(command: &Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Help => writeln!(out, "{USAGE}")?,
        Command::Recommended => {
            let text = serde_json::to_string_pretty(&recommended().to_json_value())?;
            writeln!(out, "{text}")?;
        }
        Command::Compile { config, overrides } => {
            let hooks = build_hooks(config, overrides)?;
            writeln!(out, "{}", hooks.css_text())?;
        }
        Command::Flatten {
            config,
            styles,
            overrides,
        } => {
            let hooks = build_hooks(config, overrides)?;
            let fragments = styles
                .iter()
                .map(|path| load_style(path))
                .collect::<Result<Vec<_>>>()?;
            let flat = hooks.css_all(&fragments);
            let text = serde_json::to_string_pretty(&style_to_json(&flat))?;
            writeln!(out, "{text}")?;
        }
    }
    Ok(())
}
