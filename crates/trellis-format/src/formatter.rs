use std::mem;

use trellis_dom::{Comment, Content, Element, Text};

use crate::options::FormatOptions;

/// Writes element trees one node per line.
///
/// Layout rules:
/// - an element with no content is a single `<name attrs />` line
/// - otherwise its start tag, its children one level deeper, then its end tag
/// - each line of a text node is indented on its own
/// - inside a preserved element nothing is indented and no line breaks are
///   added, so the subtree comes out exactly as the compact writer would
///   write it
#[derive(Debug)]
pub struct Formatter {
    out: String,
    options: FormatOptions,
    depth: usize,
    preserve_space: bool,
}

impl Formatter {
    /// Create a formatter that appends to `options.out`.
    #[must_use]
    pub fn new(mut options: FormatOptions) -> Self {
        Self {
            out: mem::take(&mut options.out),
            options,
            depth: 0,
            preserve_space: false,
        }
    }

    /// Format `element` and return the output buffer.
    #[must_use]
    pub fn write(element: &Element, options: FormatOptions) -> String {
        let mut formatter = Self::new(options);
        formatter.write_element(element);
        formatter.finish()
    }

    /// Format a single content item and return the output buffer.
    #[must_use]
    pub fn write_content(content: &Content, options: FormatOptions) -> String {
        let mut formatter = Self::new(options);
        formatter.format(content);
        formatter.finish()
    }

    /// The output written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.out
    }

    /// Consume the formatter and return its buffer.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    /// Append one content item.
    pub fn format(&mut self, content: &Content) {
        match content {
            Content::Element(element) => self.write_element(element),
            Content::Text(text) => self.write_lines(text.encoded()),
            Content::Raw(raw) => self.write_lines(&Text::encode(raw)),
            Content::Comment(comment) => self.write_comment(comment),
            Content::Deferred(provider) => {
                for item in provider.contents(&self.options.extra) {
                    self.format(&item);
                }
            }
        }
    }

    /// Append an element and its subtree.
    pub fn write_element(&mut self, element: &Element) {
        self.write_indent();
        self.out.push('<');
        element.write_name_and_attributes(&mut self.out);
        if element.contents().is_empty() {
            self.out.push_str(" />");
        } else {
            self.out.push('>');
            self.write_contents_of(element);
            self.out.push_str("</");
            self.out.push_str(element.name().as_str());
            self.out.push('>');
        }
        self.write_newline();
    }

    fn write_contents_of(&mut self, element: &Element) {
        let outer = self.preserve_space;
        if self.options.preserves(element) {
            self.preserve_space = true;
        }
        self.write_newline();
        self.depth += 1;
        for content in element.contents() {
            self.format(content);
        }
        self.depth -= 1;
        self.write_indent();
        // The end tag's line break follows the enclosing mode.
        self.preserve_space = outer;
    }

    fn write_comment(&mut self, comment: &Comment) {
        self.write_indent();
        comment.write_to(&mut self.out);
        self.write_newline();
    }

    fn write_lines(&mut self, encoded: &str) {
        for line in encoded.split_inclusive('\n') {
            self.write_indent();
            self.out.push_str(line);
        }
        self.write_newline();
    }

    fn write_indent(&mut self) {
        if !self.preserve_space {
            for _ in 0..self.depth {
                self.out.push_str(&self.options.indent);
            }
        }
    }

    fn write_newline(&mut self) {
        if !self.preserve_space {
            self.out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(element: &Element) -> String {
        Formatter::write(element, FormatOptions::default())
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(write(&Element::new("e")), "<e />\n");
    }

    #[test]
    fn test_string_in_element() {
        assert_eq!(write(&Element::new("e").child("string")), "<e>\n  string\n</e>\n");
    }

    #[test]
    fn test_multi_line_string() {
        assert_eq!(
            write(&Element::new("e").child("multi\nline")),
            "<e>\n  multi\n  line\n</e>\n"
        );
    }

    #[test]
    fn test_escaping_of_attributes_and_text() {
        let e = Element::new("e").attr("a", "&<>\n'\"").child("&<>\n'\"");
        assert_eq!(
            write(&e),
            "<e a='&amp;&lt;&gt;\n&apos;&quot;'>\n  &amp;&lt;&gt;\n  &apos;&quot;\n</e>\n"
        );
    }

    #[test]
    fn test_pre_encoded_text_written_verbatim() {
        let e = Element::new("e")
            .attr("a", "&<>\n'\"")
            .child(Text::from_encoded("&<>\n'\""));
        assert_eq!(write(&e), "<e a='&amp;&lt;&gt;\n&apos;&quot;'>\n  &<>\n  '\"\n</e>\n");
    }

    #[test]
    fn test_comment_first_line_indented() {
        let e = Element::new("e")
            .child(Comment::new("multi\nline\n pre-indented\n  comment").unwrap());
        assert_eq!(
            write(&e),
            "<e>\n  <!-- multi\nline\n pre-indented\n  comment -->\n</e>\n"
        );
    }

    #[test]
    fn test_custom_indent_unit() {
        let e = Element::new("a").child(Element::new("b").child(Element::new("c")));
        let out = Formatter::write(&e, FormatOptions::default().with_indent("\t"));
        assert_eq!(out, "<a>\n\t<b>\n\t\t<c />\n\t</b>\n</a>\n");
    }

    #[test]
    fn test_appends_to_given_buffer() {
        let options = FormatOptions::default().with_out("<?xml?>\n".to_string());
        assert_eq!(Formatter::write(&Element::new("e"), options), "<?xml?>\n<e />\n");
    }

    #[test]
    fn test_instance_preserve_flag() {
        let mut pre = Element::new("pre").child("a\n b");
        let _ = pre.preserve_space();
        let e = Element::new("e").child(pre);
        assert_eq!(write(&e), "<e>\n  <pre>a\n b</pre>\n</e>\n");
    }

    #[test]
    fn test_write_content_for_text() {
        let out = Formatter::write_content(&Content::from("x"), FormatOptions::default());
        assert_eq!(out, "x\n");
    }
}
