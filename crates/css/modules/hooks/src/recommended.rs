//! A ready-made hook set covering the common pseudo-classes.

use crate::condition::Condition;
use crate::config::HookConfig;

/// Hook names and their selectors. Entries with more than one selector are
/// vendor alternatives combined with OR.
const RECOMMENDED: [(&str, &[&str]); 30] = [
    ("active", &[":active"]),
    ("autofill", &[":autofill", ":-webkit-autofill"]),
    ("checked", &[":checked"]),
    ("default", &[":default"]),
    ("disabled", &[":disabled"]),
    ("empty", &[":empty"]),
    ("enabled", &[":enabled"]),
    ("evenChild", &[":nth-child(even)"]),
    ("firstChild", &[":first-child"]),
    ("firstOfType", &[":first-of-type"]),
    ("focus", &[":focus"]),
    ("focusVisible", &[":focus-visible"]),
    ("focusWithin", &[":focus-within"]),
    ("hover", &[":hover"]),
    ("inRange", &[":in-range"]),
    ("indeterminate", &[":indeterminate"]),
    ("invalid", &[":invalid"]),
    ("lastChild", &[":last-child"]),
    ("lastOfType", &[":last-of-type"]),
    ("oddChild", &[":nth-child(odd)"]),
    ("onlyChild", &[":only-child"]),
    ("onlyOfType", &[":only-of-type"]),
    ("outOfRange", &[":out-of-range"]),
    (
        "placeholderShown",
        &[":placeholder-shown", ":-moz-placeholder-shown"],
    ),
    ("readOnly", &[":read-only", ":-moz-read-only"]),
    ("readWrite", &[":read-write", ":-moz-read-write"]),
    ("required", &[":required"]),
    ("target", &[":target"]),
    ("valid", &[":valid"]),
    ("visited", &[":visited"]),
];

/// The recommended hooks as a configuration.
pub fn recommended() -> HookConfig {
    RECOMMENDED
        .iter()
        .map(|&(name, selectors)| {
            let condition = match selectors {
                [single] => Condition::leaf(*single),
                alternatives => Condition::Or(
                    alternatives
                        .iter()
                        .map(|selector| Condition::leaf(*selector))
                        .collect(),
                ),
            };
            (name, condition)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_recommended_hook_is_valid() {
        let config = recommended();
        assert_eq!(config.len(), 30);
        assert!(config.iter().all(|(_, condition)| condition.is_valid()));
    }

    #[test]
    fn vendor_alternatives_are_or_composites() {
        let config = recommended();
        assert_eq!(
            config.get("readOnly"),
            Some(&Condition::Or(vec![
                ":read-only".into(),
                ":-moz-read-only".into()
            ]))
        );
        assert_eq!(config.get("hover"), Some(&Condition::leaf(":hover")));
    }
}
