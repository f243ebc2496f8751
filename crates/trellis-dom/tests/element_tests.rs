//! Tests for building, comparing and querying element trees.

use trellis_dom::{
    AttrValue, Comment, Content, DomError, Element, Found, Name, Template, Text, TypeTag,
    assert_has,
};

/// base → sub → deep → "text", plus a sibling sub(attr=value)
fn fixture() -> Element {
    Element::new("base").init(|b| {
        let _ = b.add(Element::new("sub").init(|s| {
            let _ = s.add(Element::new("deep").child("text"));
        }));
        let _ = b.add(Element::new("sub").attr("attr", "value"));
    })
}

// ========== construction ==========

#[test]
fn test_attributes_from_mixed_keys() {
    let e = Element::with_attributes(
        "el",
        [
            (Name::from("a1"), AttrValue::from("v1")),
            (Name::from(String::from("a2")), AttrValue::from("v2")),
            (Name::from("a3"), AttrValue::Null),
        ],
    );
    assert_eq!(e.name(), "el");
    assert_eq!(e.attributes().len(), 3);
    assert_eq!(e.attribute("a3"), Some(&AttrValue::Null));
}

#[test]
fn test_nested_init_equals_incremental_build() {
    let built = Element::new("base").init(|e| {
        let _ = e.add(Element::new("sub1").init(|e| {
            let _ = e.add(Element::new("sub12"));
        }));
        let _ = e.add(Element::new("sub2"));
    });

    let mut base = Element::new("base");
    let mut sub1 = Element::new("sub1");
    let _ = sub1.add(Element::new("sub12"));
    let _ = base.add(sub1).add(Element::new("sub2"));

    assert_eq!(built, base);
}

#[test]
fn test_contents_keep_insertion_order() {
    let sub = Element::new("sub");
    let e = Element::new("el").child("String1").child("String2").child(sub.clone());
    assert_eq!(
        e.contents(),
        &[Content::from("String1"), Content::from("String2"), Content::from(sub)]
    );
}

// ========== serialization ==========

#[test]
fn test_self_closing_vs_content() {
    assert_eq!(Element::new("e").to_string(), "<e />");
    assert_eq!(Element::new("e").child("x").to_string(), "<e>x</e>");
}

#[test]
fn test_attribute_omission() {
    let e = Element::with_attributes(
        "e",
        [("a", AttrValue::Bool(true)), ("b", AttrValue::Bool(false)), ("c", AttrValue::Null)],
    );
    assert_eq!(e.to_string(), "<e a='true' />");
}

#[test]
fn test_escaping_applied_once_per_pass() {
    let e = Element::new("e").child(Text::new("&amp;"));
    assert_eq!(e.to_string(), "<e>&amp;amp;</e>");
    // Writing twice must not escape twice.
    assert_eq!(e.to_string(), e.to_string());
}

#[test]
fn test_write_to_appends_to_existing_buffer() {
    let mut out = String::from("prefix:");
    Element::new("el").write_to(&mut out);
    assert_eq!(out, "prefix:<el />");
}

#[test]
fn test_tree_serializes_to_json() {
    let e = Element::new("e").attr("k", "v").child("text");
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(json["name"], "e");
    assert_eq!(json["attributes"]["k"], "v");
    assert_eq!(json["contents"][0]["type"], "raw");
    assert_eq!(json["contents"][0]["value"], "text");
}

// ========== comments ==========

#[test]
fn test_comment_rejection() {
    assert!(matches!(
        Comment::new("bad -- comment"),
        Err(DomError::InvalidComment(_))
    ));
}

// ========== querying ==========

#[test]
fn test_has_semantics() {
    let base = fixture();
    assert!(base.has("sub"));
    assert!(base.has_with("sub", [("attr", "value")]));
    assert!(!base.has_with("sub", [("attr", "value"), ("attr2", "")]));
    assert!(base.has("deep"));
    assert!(base.has(TypeTag::Raw));
}

#[test]
fn test_find_returns_both_subs_in_document_order() {
    let base = fixture();
    let found = base.find("sub");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].as_element().map(Element::contents).map(<[Content]>::len), Some(1));
    assert_eq!(
        found[1].as_element().and_then(|e| e.attribute("attr")),
        Some(&AttrValue::from("value"))
    );
}

#[test]
fn test_find_with_regex_name_visits_preorder() {
    let base = fixture();
    let names: Vec<&str> = base
        .find(regex::Regex::new("").unwrap())
        .into_iter()
        .filter_map(Found::as_element)
        .map(|e| e.name().as_str())
        .collect();
    assert_eq!(names, vec!["base", "sub", "deep", "sub"]);
}

#[test]
fn test_assert_has_macro() {
    let base = fixture();
    assert_has!(base, "deep");
    assert_has!(base, Template::new("sub").attr("attr", "value"));
}

#[test]
#[should_panic(expected = "doesn't have")]
fn test_assert_has_macro_fails() {
    let base = fixture();
    assert_has!(base, "missing");
}
