//! Value stringification: how leaf values become CSS text.
//!
//! The flattener only needs `(property, value) -> Option<String>`. `None`
//! means the value cannot be rendered; such values are left untouched and
//! never take part in a fallback chain.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::style::StyleValue;

/// Renders a style value for a property.
pub trait Stringify {
    fn stringify(&self, property: &str, value: &StyleValue) -> Option<String>;
}

impl<F> Stringify for F
where
    F: Fn(&str, &StyleValue) -> Option<String>,
{
    fn stringify(&self, property: &str, value: &StyleValue) -> Option<String> {
        self(property, value)
    }
}

/// Strings as-is, numbers in their shortest decimal form, nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericStringify;

impl Stringify for GenericStringify {
    fn stringify(&self, _property: &str, value: &StyleValue) -> Option<String> {
        match value {
            StyleValue::String(text) => Some(text.clone()),
            StyleValue::Number(number) => Some(format_number(*number)),
            StyleValue::Null | StyleValue::Bool(_) | StyleValue::List(_) | StyleValue::Object(_) => {
                None
            }
        }
    }
}

/// Like [`GenericStringify`], but numbers on dimensional properties get a
/// `px` unit. Unitless properties (`opacity`, `zIndex`, `lineHeight`, custom
/// properties, ...) keep bare numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct PixelStringify;

impl Stringify for PixelStringify {
    fn stringify(&self, property: &str, value: &StyleValue) -> Option<String> {
        match value {
            StyleValue::Number(number) if !is_unitless(property) => {
                Some(format!("{}px", format_number(*number)))
            }
            _ => GenericStringify.stringify(property, value),
        }
    }
}

/// Returns `var(...)` strings unchanged and delegates everything else.
///
/// References produced by an earlier flatten must never be re-rendered by a
/// custom stringifier.
#[derive(Clone, Copy)]
pub struct VarPassthrough<'inner>(pub &'inner dyn Stringify);

impl Stringify for VarPassthrough<'_> {
    fn stringify(&self, property: &str, value: &StyleValue) -> Option<String> {
        match value {
            StyleValue::String(text) if text.starts_with("var(") => Some(text.clone()),
            _ => self.0.stringify(property, value),
        }
    }
}

/// Decimal text of a number: integers without a fraction, `-0` as `0`,
/// non-finite values as `NaN`/`Infinity`/`-Infinity`.
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_owned()
    } else if number.is_infinite() {
        if number.is_sign_positive() {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        }
    } else if number == 0.0 {
        "0".to_owned()
    } else {
        number.to_string()
    }
}

/// Properties whose numeric values carry no unit, in camelCase.
static UNITLESS_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "animationIterationCount",
        "aspectRatio",
        "borderImageOutset",
        "borderImageSlice",
        "borderImageWidth",
        "boxFlex",
        "boxFlexGroup",
        "boxOrdinalGroup",
        "columnCount",
        "columns",
        "fillOpacity",
        "flex",
        "flexGrow",
        "flexNegative",
        "flexOrder",
        "flexPositive",
        "flexShrink",
        "floodOpacity",
        "fontWeight",
        "gridArea",
        "gridColumn",
        "gridColumnEnd",
        "gridColumnSpan",
        "gridColumnStart",
        "gridRow",
        "gridRowEnd",
        "gridRowSpan",
        "gridRowStart",
        "lineClamp",
        "lineHeight",
        "opacity",
        "order",
        "orphans",
        "scale",
        "stopOpacity",
        "strokeDasharray",
        "strokeDashoffset",
        "strokeMiterlimit",
        "strokeOpacity",
        "strokeWidth",
        "tabSize",
        "widows",
        "zIndex",
        "zoom",
    ]
    .into_iter()
    .collect()
});

/// Whether numbers for `property` are rendered without a unit.
///
/// Accepts camelCase and kebab-case names; custom properties are unitless.
pub fn is_unitless(property: &str) -> bool {
    if property.starts_with("--") {
        return true;
    }
    if property.contains('-') {
        return UNITLESS_PROPERTIES.contains(kebab_to_camel(property).as_str());
    }
    UNITLESS_PROPERTIES.contains(property)
}

fn kebab_to_camel(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper_next = false;
    for character in property.trim_start_matches('-').chars() {
        if character == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(character.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(character);
        }
    }
    out
}
