// src/extract/events.rs

use html5gum::{DefaultEmitter, Token, Tokenizer};

/// A single `name="value"` pair from a start tag.
pub type Attribute = (String, String);

/// Receives markup events in document order.
pub trait MarkupVisitor {
    fn on_tag_open(&mut self, name: &str, attributes: &[Attribute]);
    fn on_tag_close(&mut self, name: &str);
    fn on_text(&mut self, content: &str);
}

/// Tokenize `markup` and feed every tag/text event to `visitor`.
///
/// Script-like elements (`<script>`, `<style>`, ...) are switched into raw text
/// mode so their bodies never show up as tags. Comments, doctypes and
/// tokenizer errors are dropped.
pub fn drive<V: MarkupVisitor + ?Sized>(markup: &str, visitor: &mut V) {
    let mut emitter = DefaultEmitter::default();
    emitter.switch_states(true);

    for token in Tokenizer::new_with_emitter(markup, emitter).flatten() {
        match token {
            Token::StartTag(tag) => {
                let name = String::from_utf8_lossy(&tag.name);
                let attributes: Vec<Attribute> = tag
                    .attributes
                    .iter()
                    .map(|(k, v)| {
                        (
                            String::from_utf8_lossy(k).into_owned(),
                            String::from_utf8_lossy(v).into_owned(),
                        )
                    })
                    .collect();
                visitor.on_tag_open(&name, &attributes);
            }
            Token::EndTag(tag) => {
                visitor.on_tag_close(&String::from_utf8_lossy(&tag.name));
            }
            Token::String(text) => {
                visitor.on_text(&String::from_utf8_lossy(&text));
            }
            _ => {}
        }
    }
}

/// True if the `class` attribute has a whitespace-separated token starting with `prefix`.
pub fn has_class_prefix(attributes: &[Attribute], prefix: &str) -> bool {
    attributes
        .iter()
        .filter(|(name, _)| name == "class")
        .any(|(_, value)| value.split_whitespace().any(|tok| tok.starts_with(prefix)))
}
