#![cfg(test)]

use css_hooks::{Condition, HookConfig, Hooks, create_hooks, recommended, style_from_json};
use serde_json::json;

#[test]
fn hashed_ids_are_stable_across_builds() {
    let first = create_hooks(recommended());
    let second = create_hooks(recommended());
    assert_eq!(first.css_text(), second.css_text());
    assert_eq!(first.hook_id("hover"), Some("zh6im6"));
    assert_eq!(first.hook_id("focus"), Some("yirgyq"));
    assert_eq!(first.hook_id("autofill"), Some("97xkod"));
}

#[test]
fn ids_depend_on_condition_not_name() {
    let hooks = create_hooks(
        HookConfig::new()
            .with("hover", ":hover")
            .with("pointer", ":hover")
            .with("wide", "@media (width >= 600px)"),
    );
    assert_eq!(hooks.hook_id("hover"), hooks.hook_id("pointer"));
    assert_eq!(hooks.hook_id("wide"), Some("xdckbi"));
}

#[test]
fn equivalent_composites_share_an_id() {
    let flat = create_hooks(HookConfig::new().with(
        "any",
        Condition::Or(vec![":a".into(), ":b".into(), ":c".into()]),
    ));
    let nested = create_hooks(HookConfig::new().with(
        "any",
        Condition::Or(vec![
            ":a".into(),
            Condition::Or(vec![":b".into(), ":c".into()]),
        ]),
    ));
    assert_eq!(flat.hook_id("any"), nested.hook_id("any"));
    assert_eq!(flat.css_text(), nested.css_text());

    let single =
        create_hooks(HookConfig::new().with("hover", Condition::Or(vec![":hover".into()])));
    let leaf = create_hooks(HookConfig::new().with("hover", ":hover"));
    assert_eq!(single.hook_id("hover"), leaf.hook_id("hover"));
    assert_eq!(single.css_text(), leaf.css_text());
}

#[test]
fn debug_ids_embed_the_hook_name() {
    let hooks = Hooks::builder(HookConfig::new().with("group:hover", ".group:hover &"))
        .debug(true)
        .build();
    let id = hooks.hook_id("group:hover").unwrap_or_default();
    assert!(id.starts_with("group_hover-"), "{id}");
    assert!(hooks.css_text().contains(&format!("--{id}-0:initial")));
}

#[test]
fn flatten_output_is_repeatable() {
    let hooks = create_hooks(recommended());
    let style = style_from_json(json!({
        "color": "black",
        "hover": {"color": "blue", "focus": {"color": "navy"}},
        "disabled": {"opacity": 0.5}
    }))
    .unwrap_or_default();
    let outputs: Vec<_> = (0..4).map(|_| hooks.css(&style)).collect();
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
}
