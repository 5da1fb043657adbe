//! Integration tests for yoshiki.
//!
//! These tests exercise the public API from outside the crate: the style API
//! on both targets, the registry lifecycle, and the server render to client
//! hydration flow through a headless document.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::json;

use yoshiki::resolve::{resolve, ResolveContext};
use yoshiki::testing::{browser_context, rules_in, section_names, shared_registry};
use yoshiki::*;

fn card() -> Style {
    Style::new()
        .set("padding", 10)
        .set("backgroundColor", Breakpoints::new().xs("green").md("red"))
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn test_registering_twice_flushes_once() {
    let rule = ".ys-color-red { color: red; }";
    let key = || StyleKey::atomic("ys-color-red", State::Normal, None);

    let mut once = Registry::new();
    once.add_rule(key(), rule);

    let mut twice = Registry::new();
    twice.add_rule(key(), rule);
    twice.add_rule(key(), rule);

    assert_eq!(once.flush(), twice.flush());
    assert!(twice.flush().is_empty());
}

#[test]
fn test_flush_with_nothing_pending_is_a_no_op() {
    let mut registry = Registry::new();
    assert!(registry.flush().is_empty());
    assert_eq!(registry.phase(), Phase::Idle);
    assert_eq!(registry.flush_to_string(), "");
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[test]
fn test_breakpoint_cascade_never_looks_forward() {
    let theme = Theme::new();
    let value = StyleValue::from(Breakpoints::new().sm("A").lg("B"));

    let at = |tier| resolve(&value, &ResolveContext::new(&theme, tier));
    assert_eq!(at(Breakpoint::Md), Some(Literal::from("A")));
    assert_eq!(at(Breakpoint::Xl), Some(Literal::from("B")));
    assert_eq!(at(Breakpoint::Xs), None);
}

#[test]
fn test_axis_shorthand_matches_primitives() {
    let native = StyleContext::native(Theme::new());
    let short = native.css(Style::new().set("pX", 12), Props::new());
    let long = native.css(
        Style::new().set("paddingLeft", 12).set("paddingRight", 12),
        Props::new(),
    );
    let idle = Interaction::idle();
    assert_eq!(
        short.style.unwrap_or_default().at(idle),
        long.style.unwrap_or_default().at(idle)
    );

    let (browser, _) = browser_context(Theme::new());
    let short = browser.css(Style::new().set("pX", 12), Props::new());
    let long = browser.css(
        Style::new().set("paddingLeft", 12).set("paddingRight", 12),
        Props::new(),
    );
    assert_eq!(short.class_name, long.class_name);
}

#[test]
fn test_theme_tokens_resolve_on_both_targets() {
    let theme = Theme::from_value(json!({ "colors": { "primary": "#ff0000" } })).unwrap();
    let style = Style::new().set("color", StyleValue::token("colors.primary"));

    let native = StyleContext::native(theme.clone()).css(&style, Props::new());
    assert_eq!(
        native.style.unwrap_or_default().at(Interaction::idle()),
        InlineStyle::new().with("color", "#ff0000")
    );

    let (browser, registry) = browser_context(theme);
    let out = browser.css(&style, Props::new());
    assert_eq!(out.class_name.as_deref(), Some("ys-color-_23ff0000"));
    assert_eq!(
        registry.borrow_mut().flush(),
        vec![".ys-color-_23ff0000 { color: #ff0000; }"]
    );
}

// ---------------------------------------------------------------------------
// Native target
// ---------------------------------------------------------------------------

#[test]
fn test_native_scenario_follows_viewport_tier() {
    let at = |width: f32| {
        StyleContext::native(Theme::new())
            .with_width(width)
            .css(card(), Props::new())
            .style
            .unwrap_or_default()
            .at(Interaction::idle())
    };

    assert_eq!(
        at(320.0),
        InlineStyle::new().with("padding", 10).with("backgroundColor", "green")
    );
    assert_eq!(
        at(1280.0),
        InlineStyle::new().with("padding", 10).with("backgroundColor", "red")
    );
}

#[test]
fn test_native_states_defer_to_interaction() {
    let out = StyleContext::native(Theme::new()).css(
        Style::new()
            .set("opacity", 1)
            .press(Style::new().set("opacity", 0.5))
            .fover(Style::new().set("borderColor", "blue")),
        Props::new().with_style(InlineStyle::new().with("margin", 4)),
    );
    let style = out.style.unwrap_or_default();
    assert!(style.is_stateful());

    assert_eq!(
        style.at(Interaction::idle()),
        InlineStyle::new().with("opacity", 1).with("margin", 4)
    );
    let focused = style.at(Interaction::idle().focused(true));
    assert_eq!(focused.get("borderColor"), Some(&Literal::from("blue")));
    let pressed = style.at(Interaction::idle().pressed(true));
    assert_eq!(pressed.get("opacity"), Some(&Literal::Number(0.5)));
    assert_eq!(pressed.get("borderColor"), None);
}

#[test]
fn test_native_passthrough_style_wins() {
    let out = StyleContext::native(Theme::new()).css(
        Style::new().set("color", "red").set("margin", 2),
        Props::new()
            .with_class("kept")
            .with_style(InlineStyle::new().with("color", "green")),
    );
    let style = out.style.unwrap_or_default().at(Interaction::idle());
    assert_eq!(style.get("color"), Some(&Literal::from("green")));
    assert_eq!(style.get("margin"), Some(&Literal::Number(2.0)));
    assert_eq!(out.class_name.as_deref(), Some("kept"));
}

#[test]
fn test_native_children_follow_parent_state() {
    let out = StyleContext::native(Theme::new()).css(
        Style::new()
            .child("label", Style::new().set("color", "black"))
            .hover(Style::new().child("label", Style::new().set("color", "blue"))),
        Props::new(),
    );
    let label = out.child("label").and_then(|child| child.style.clone()).unwrap_or_default();
    assert_eq!(label.at(Interaction::idle()).get("color"), Some(&Literal::from("black")));
    assert_eq!(
        label.at(Interaction::idle().hovered(true)).get("color"),
        Some(&Literal::from("blue"))
    );
}

// ---------------------------------------------------------------------------
// Browser target
// ---------------------------------------------------------------------------

#[test]
fn test_browser_scenario_emits_media_scoped_classes() {
    let (ctx, registry) = browser_context(Theme::new());
    let out = ctx.css(card(), Props::new());
    assert_eq!(
        out.classes(),
        vec![
            "ys-padding-10",
            "ys-xs_backgroundColor-green",
            "ys-md_backgroundColor-red",
        ]
    );

    let css = registry.borrow_mut().flush_to_string();
    insta::assert_snapshot!(css.trim(), @r"
    /* a-normal-default */
    .ys-padding-10 { padding: 10px; }

    /* a-normal-xs */
    @media (min-width: 0px) { .ys-xs_backgroundColor-green { background-color: green; } }

    /* a-normal-md */
    @media (min-width: 900px) { .ys-md_backgroundColor-red { background-color: red; } }
    ");
}

#[test]
fn test_hover_rules_follow_normal_rules() {
    let (ctx, registry) = browser_context(Theme::new());
    let out = ctx.css(
        Style::new().hover(Style::new().set("color", "blue")).set("color", "black"),
        Props::new(),
    );
    assert_eq!(out.classes(), vec!["ys-color-black", "ys-hover_color-blue"]);

    let css = registry.borrow_mut().flush_to_string();
    assert_eq!(section_names(&css), vec!["a-normal-default", "a-hover-default"]);
    assert_eq!(
        rules_in(&css, "a-hover-default"),
        vec![":where(body:not(.noHover)) .ys-hover_color-blue:hover { color: blue; }"]
    );
}

#[test]
fn test_shared_styles_register_one_rule() {
    let (ctx, registry) = browser_context(Theme::new());
    let first = ctx.css(Style::new().set("bg", "red"), Props::new());
    let second = ctx.css(Style::new().set("bg", "red"), Props::new().with_class("other"));

    assert_eq!(first.classes(), vec!["ys-background-unset", "ys-backgroundColor-red"]);
    assert_eq!(
        second.classes(),
        vec!["ys-background-unset", "ys-backgroundColor-red", "other"]
    );

    let rules = registry.borrow_mut().flush();
    let color_rules = rules
        .iter()
        .filter(|rule| rule.contains("background-color: red"))
        .count();
    assert_eq!(color_rules, 1);
    assert_eq!(rules.len(), 2);
}

#[test]
fn test_class_names_do_not_depend_on_the_registry() {
    let (first, _) = browser_context(Theme::new());
    let (second, _) = browser_context(Theme::new());
    let style = Style::new()
        .set("margin", -4)
        .focus(Style::new().set("outline", "2px solid #000"));

    let a = first.css(&style, Props::new());
    let b = second.css(&style, Props::new());
    let again = first.css(&style, Props::new());
    assert_eq!(a.class_name, b.class_name);
    assert_eq!(a.class_name, again.class_name);
}

#[test]
fn test_later_declarations_and_passthrough_classes_win() {
    let (ctx, _) = browser_context(Theme::new());
    let merged = ctx.css(
        [Style::new().set("color", "red"), Style::new().set("color", "blue")],
        Props::new(),
    );
    assert_eq!(merged.class_name.as_deref(), Some("ys-color-blue"));

    let overridden = ctx.css(
        Style::new().set("color", "red"),
        Props::new().with_class("ys-color-green").with_attr("role", "button"),
    );
    assert_eq!(overridden.class_name.as_deref(), Some("ys-color-green"));
    assert_eq!(overridden.attrs.get("role").map(String::as_str), Some("button"));
}

#[test]
fn test_json_declaration_lists() {
    let (ctx, _) = browser_context(Theme::new());
    let out = ctx
        .css_json(
            r#"[{ "padding": 10 }, null, false, [{ "hover": { "color": "blue" } }]]"#,
            Props::new(),
        )
        .unwrap();
    assert_eq!(out.classes(), vec!["ys-padding-10", "ys-hover_color-blue"]);

    assert!(ctx.css_json("{ not json", Props::new()).is_err());
}

#[test]
fn test_object_literals_stay_native_only() {
    let json = r#"{ "padding": 4, "shadowOffset": { "width": 1, "height": 2 } }"#;

    let (browser, registry) = browser_context(Theme::new());
    let out = browser.css_json(json, Props::new()).unwrap();
    assert_eq!(out.classes(), vec!["ys-padding-4"]);
    assert_eq!(registry.borrow_mut().flush(), vec![".ys-padding-4 { padding: 4px; }"]);

    let native = StyleContext::native(Theme::new()).css_json(json, Props::new()).unwrap();
    let style = native.style.unwrap_or_default().at(Interaction::idle());
    assert_eq!(
        style.get("shadowOffset"),
        Some(&Literal::Json(json!({ "width": 1, "height": 2 })))
    );
}

#[test]
fn test_vendor_prefixes_and_unitless_numbers() {
    let (ctx, registry) = browser_context(Theme::new());
    ctx.css(
        Style::new().set("userSelect", "none").set("opacity", 0.5).set("position", "sticky"),
        Props::new(),
    );
    let rules = registry.borrow_mut().flush();
    assert_eq!(
        rules,
        vec![
            ".ys-userSelect-none { -webkit-user-select: none; -moz-user-select: none; user-select: none; }",
            ".ys-opacity-0_2e5 { opacity: 0.5; }",
            ".ys-position-sticky { position: -webkit-sticky; position: sticky; }",
        ]
    );
}

#[test]
fn test_missing_registry_is_not_fatal() {
    let ctx = StyleContext::new(Theme::new());
    let out = ctx.css(card(), Props::new());
    assert_eq!(out.classes().len(), 3);
}

// ---------------------------------------------------------------------------
// Server rendering and hydration
// ---------------------------------------------------------------------------

#[test]
fn test_serialize_then_hydrate_flushes_nothing_new() {
    let (server, server_registry) = browser_context(Theme::new());
    server.css(card(), Props::new());
    server.css(
        Style::new().hover(Style::new().set("color", "blue")).set("color", "black"),
        Props::new(),
    );
    server_registry.borrow_mut().flush();
    let sheet = server_registry.borrow().to_style_string();

    let mut client = Registry::new();
    let keys: Vec<&str> = sheet.keys.iter().map(String::as_str).collect();
    assert_eq!(client.hydrate_style(&sheet.css, &keys), Ok(5));
    assert_eq!(client.phase(), Phase::Hydrated);
    assert!(client.flush().is_empty());
    assert_eq!(client.to_style_string(), sheet);
}

#[test]
fn test_server_markup_hydrates_the_client_document() {
    let (server, server_registry) = browser_context(Theme::new());
    let rendered = server.css(card(), Props::new());
    let markup = server_registry.borrow_mut().flush_to_component();
    assert!(markup.starts_with(r#"<style data-yoshiki="ys-padding-10 "#));

    let mut document = Document::from_html(&format!(r#"<meta charset="utf-8">{markup}"#));
    let server_sheet = document.query_by_tag("style").first().copied();
    let client_registry = shared_registry();
    let client = StyleContext::new(Theme::new()).with_registry(Rc::clone(&client_registry));

    // The client renders the same tree before its first flush.
    let hydrated = client.css(card(), Props::new());
    assert_eq!(hydrated.class_name, rendered.class_name);

    let flushed = client_registry.borrow_mut().flush_to_browser(&mut document);
    assert!(flushed.is_empty());
    assert_eq!(document.query_by_tag("style").len(), 1);
    assert_eq!(document.owned_sheet_id(), server_sheet);
    let owned = document.owned_sheet().map(|sheet| sheet.text.clone());
    assert_eq!(owned, Some(server_registry.borrow().to_style_string().css));

    // New styles are appended to the owned sheet.
    client.css(Style::new().set("margin", 8), Props::new());
    let flushed = client_registry.borrow_mut().flush_to_browser(&mut document);
    assert_eq!(flushed, vec![".ys-margin-8 { margin: 8px; }"]);
    let owned = document.owned_sheet().map(|sheet| sheet.text.clone()).unwrap_or_default();
    assert_eq!(rules_in(&owned, "a-normal-default").len(), 2);
    assert_eq!(document.owned_sheet_id(), server_sheet);
}

#[test]
fn test_partial_hydration_regenerates_the_rest() {
    let (server, server_registry) = browser_context(Theme::new());
    server.css(card(), Props::new());
    let sheet = {
        let mut registry = server_registry.borrow_mut();
        registry.flush();
        registry.to_style_string()
    };

    let mut client = Registry::new();
    let err = client.hydrate_style(&sheet.css, &[sheet.keys[0].as_str()]);
    assert_eq!(err, Err(HydrationError::MissingKeys { rules: 3, keys: 1 }));
    assert_eq!(client.len(), 1);

    let client = Rc::new(std::cell::RefCell::new(client));
    StyleContext::new(Theme::new())
        .with_registry(Rc::clone(&client))
        .css(card(), Props::new());
    assert_eq!(client.borrow_mut().flush().len(), 2);
}

#[test]
fn test_string_sink_collects_server_output() {
    let (ctx, registry) = browser_context(Theme::new());
    ctx.css(Style::new().set("color", "red"), Props::new());

    let mut sink = StringSink::new();
    registry.borrow_mut().flush_to_browser(&mut sink);
    assert_eq!(sink.writes(), 1);
    assert_eq!(
        sink.to_component(),
        "<style data-yoshiki=\"ys-color-red\">\n/* a-normal-default */\n.ys-color-red { color: red; }</style>"
    );

    // Nothing new: the sink is left alone.
    registry.borrow_mut().flush_to_browser(&mut sink);
    assert_eq!(sink.writes(), 1);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[test]
fn test_automatic_theme_feeds_the_style_api() {
    let registry = shared_registry();
    let theme = automatic_theme(
        &mut registry.borrow_mut(),
        "app",
        &json!({ "colors": { "text": "black" } }),
        &json!({ "colors": { "text": "white" } }),
    )
    .unwrap();

    let ctx = StyleContext::new(theme).with_registry(Rc::clone(&registry));
    let out = ctx.css(
        Style::new().set("color", StyleValue::token("colors.text")),
        Props::new(),
    );
    assert_eq!(out.class_name.as_deref(), Some("ys-color-var_28_2d_2dapp_2dcolors_2dtext_29"));

    let css = registry.borrow_mut().flush_to_string();
    assert_eq!(
        section_names(&css),
        vec!["a-normal-default", "u-normal-default"]
    );
}

#[test]
fn test_lengths_on_both_targets() {
    let width = Length::min([Length::px(480.0), Length::vw(90.0)]);
    let (browser, registry) = browser_context(Theme::new());
    browser.css(Style::new().set("width", width.clone()), Props::new());
    assert_eq!(
        registry.borrow_mut().flush(),
        vec![".ys-width-min_28480px_2c_2090vw_29 { width: min(480px, 90vw); }"]
    );

    let viewport = Viewport::new(400.0, 800.0);
    assert_eq!(width.resolve(Target::Native, &viewport), Literal::Number(360.0));
    assert_eq!(viewport.breakpoint(), Breakpoint::Xs);
}

#[test]
fn test_native_lengths_follow_the_viewport() {
    let style = Style::new()
        .set("width", Breakpoints::new().xs(Length::vw(90.0)).md(Length::px(800.0)))
        .set("height", Length::percent(100.0));

    let phone = StyleContext::native(Theme::new()).with_viewport(Viewport::new(400.0, 800.0));
    let out = phone.css(style.clone(), Props::new()).style.unwrap().at(Interaction::idle());
    assert_eq!(out.get("width"), Some(&Literal::Number(360.0)));
    assert_eq!(out.get("height"), Some(&Literal::from("100%")));

    let desktop = StyleContext::native(Theme::new()).with_viewport(Viewport::new(1300.0, 800.0));
    let out = desktop.css(style, Props::new()).style.unwrap().at(Interaction::idle());
    assert_eq!(out.get("width"), Some(&Literal::Number(800.0)));
}

#[test]
fn test_browser_lengths_emit_media_scoped_classes() {
    let (ctx, registry) = browser_context(Theme::new());
    let out = ctx.css(
        Style::new().set("width", Breakpoints::new().xs(Length::vw(10.0)).md(Length::px(800.0))),
        Props::new(),
    );
    assert_eq!(out.classes(), vec!["ys-xs_width-10vw", "ys-md_width-800px"]);
    let css = registry.borrow_mut().flush_to_string();
    assert_eq!(
        rules_in(&css, "a-normal-md"),
        vec!["@media (min-width: 900px) { .ys-md_width-800px { width: 800px; } }"]
    );
}

#[cfg(feature = "macros")]
#[test]
fn test_style_macro_matches_the_builder() {
    let built = yoshiki::style! {
        padding: 10,
        backgroundColor: { xs: "green", md: "red" },
        hover: { color: "blue" },
    };
    let expected = card().hover(Style::new().set("color", "blue"));
    assert_eq!(built, expected);
}
