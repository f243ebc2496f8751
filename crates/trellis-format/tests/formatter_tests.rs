//! Tests for indented output: layout, preserve regions and deferred content.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_dom::kind::ELEMENT;
use trellis_dom::{Attributes, Content, ContentProvider, Element, Kind, ProviderOptions};
use trellis_format::{FormatOptions, Formatter};

fn write(element: &Element) -> String {
    Formatter::write(element, FormatOptions::default())
}

// ========== layout ==========

#[test]
fn test_elements_in_element() {
    let e = Element::new("e").child(Element::new("s1")).child(Element::new("s2"));
    assert_eq!(write(&e), "<e>\n  <s1 />\n  <s2 />\n</e>\n");
}

#[test]
fn test_empty_element_with_attributes() {
    let e = Element::new("e").attr("a1", "v1").attr("a2", "v2");
    assert_eq!(write(&e), "<e a1='v1' a2='v2' />\n");
}

#[test]
fn test_full_document() {
    let e = Element::new("base").init(|base| {
        let _ = base.add(Element::new("sub1"));
        let _ = base.add(Element::new("sub2").child("text2"));
        let _ = base.add(
            Element::new("sub3")
                .attr("a1", "v1")
                .child(Element::new("sub31"))
                .child(Element::new("sub32").child("text32")),
        );
        let _ = base.add(Element::new("sub4").child("multi-line\ntext"));
        let _ = base.add(
            Element::new("sub5")
                .child(Element::new("sub51"))
                .child("sub52")
                .child(Element::new("sub53"))
                .child("sub54-1\nsub54-2"),
        );
    });
    let expected = "\
<base>
  <sub1 />
  <sub2>
    text2
  </sub2>
  <sub3 a1='v1'>
    <sub31 />
    <sub32>
      text32
    </sub32>
  </sub3>
  <sub4>
    multi-line
    text
  </sub4>
  <sub5>
    <sub51 />
    sub52
    <sub53 />
    sub54-1
    sub54-2
  </sub5>
</base>
";
    assert_eq!(write(&e), expected);
}

// ========== preserve regions ==========

#[test]
fn test_preserve_by_name() {
    let e = Element::new("e")
        .child(
            Element::new("pre1")
                .child(Element::new("sub1").child("text"))
                .child(Element::new("sub2")),
        )
        .child(Element::new("pre2").child("multi\nline\ntext"))
        .child(Element::new("sub1").child("text"));
    let expected = "\
<e>
  <pre1><sub1>text</sub1><sub2 /></pre1>
  <pre2>multi
line
text</pre2>
  <sub1>
    text
  </sub1>
</e>
";
    let options = FormatOptions::default().with_preserver("pre1").with_preserver("pre2");
    assert_eq!(Formatter::write(&e, options), expected);
}

static PRE: Kind = Kind::derive("pre", &ELEMENT);
static P1: Kind = Kind::derive("p1", &PRE);
static P2: Kind = Kind::derive("p2", &P1);

fn of_kind(kind: &'static Kind, name: &str) -> Element {
    Element::of_kind(kind, name, Attributes::new())
}

#[test]
fn test_preserve_by_kind() {
    let e = Element::new("e")
        .child(of_kind(&PRE, "pre").child("text\nwith\nnewline"))
        .child(of_kind(&PRE, "dummy").child("t\nn"))
        .child(of_kind(&P1, "p1").child("t1\nn"))
        .child(of_kind(&P2, "p2").child("t2\nn"))
        .child(of_kind(&PRE, "pre").child(Element::new("s").child("t\ns")))
        .child(of_kind(&P2, "p2").child(Element::new("s").child("t\ns2")))
        .child(Element::new("s").child(Element::new("s").child("t\ns")));
    let expected = "\
<e>
  <pre>text
with
newline</pre>
  <dummy>t
n</dummy>
  <p1>t1
n</p1>
  <p2>t2
n</p2>
  <pre><s>t
s</s></pre>
  <p2><s>t
s2</s></p2>
  <s>
    <s>
      t
      s
    </s>
  </s>
</e>
";
    let options = FormatOptions::default().with_preserver(&PRE);
    assert_eq!(Formatter::write(&e, options), expected);
}

#[test]
fn test_preserve_region_matches_compact_output() {
    let pre = Element::new("pre").child(Element::new("b").child(" x ")).child("\n y");
    let compact = pre.to_string();
    let out = Formatter::write(&pre, FormatOptions::default().with_preserver("pre"));
    assert_eq!(out, format!("{compact}\n"));
}

// ========== deferred content ==========

#[derive(Debug, Default)]
struct Recording {
    seen: RefCell<Vec<ProviderOptions>>,
    items: Vec<&'static str>,
}

impl ContentProvider for Recording {
    fn contents(&self, options: &ProviderOptions) -> Vec<Content> {
        self.seen.borrow_mut().push(options.clone());
        self.items.iter().copied().map(Content::from).collect()
    }
}

#[test]
fn test_provider_receives_extra_options() {
    let provider = Rc::new(Recording::default());
    let e = Element::new("e").child(Content::Deferred(provider.clone()));
    let options = FormatOptions::default().with_option("a", "10").with_option("b", "20");
    let _ = Formatter::write(&e, options);

    let seen = provider.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("a").map(String::as_str), Some("10"));
    assert_eq!(seen[0].get("b").map(String::as_str), Some("20"));
}

#[test]
fn test_provider_items_are_spliced_in_place() {
    let provider = Recording {
        items: vec!["m0", "m1"],
        ..Recording::default()
    };
    let e = Element::new("e").child(Content::deferred(provider));
    assert_eq!(write(&e), "<e>\n  m0\n  m1\n</e>\n");
}

#[test]
fn test_compact_writer_calls_provider_with_empty_options() {
    let provider = Rc::new(Recording {
        items: vec!["m"],
        ..Recording::default()
    });
    let e = Element::new("e").child(Content::Deferred(provider.clone()));
    assert_eq!(e.to_string(), "<e>m</e>");
    assert!(provider.seen.borrow()[0].is_empty());
}

// ========== parsed input ==========

#[test]
fn test_reformat_parsed_document() {
    let e = trellis_xml::parse_element("<a><b>x</b><c/></a>").unwrap();
    assert_eq!(write(&e), "<a>\n  <b>\n    x\n  </b>\n  <c />\n</a>\n");
}
