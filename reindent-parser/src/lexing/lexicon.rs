//! Lexicon definitions
//!
//!     A lexicon is plain configuration data: an ordered list of regex patterns, each
//!     bound to the token kind it produces. Order is significant. When two patterns
//!     can match at the same earliest position, the one declared first wins.

use crate::token::TokenKind;
use serde::{Deserialize, Serialize};

/// One `pattern → kind` binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconRule {
    pub pattern: String,
    pub kind: TokenKind,
}

impl LexiconRule {
    pub fn new(pattern: impl Into<String>, kind: TokenKind) -> Self {
        LexiconRule {
            pattern: pattern.into(),
            kind,
        }
    }
}

/// Ordered list of lexicon rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    rules: Vec<LexiconRule>,
}

impl Lexicon {
    pub fn new() -> Self {
        Lexicon { rules: Vec::new() }
    }

    /// Append a rule, builder style.
    pub fn rule(mut self, pattern: impl Into<String>, kind: TokenKind) -> Self {
        self.push(pattern, kind);
        self
    }

    pub fn push(&mut self, pattern: impl Into<String>, kind: TokenKind) {
        self.rules.push(LexiconRule::new(pattern, kind));
    }

    pub fn rules(&self) -> &[LexiconRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<P: Into<String>> FromIterator<(P, TokenKind)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (P, TokenKind)>>(iter: I) -> Self {
        Lexicon {
            rules: iter
                .into_iter()
                .map(|(pattern, kind)| LexiconRule::new(pattern, kind))
                .collect(),
        }
    }
}

impl From<Vec<LexiconRule>> for Lexicon {
    fn from(rules: Vec<LexiconRule>) -> Self {
        Lexicon { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let lexicon = Lexicon::new()
            .rule(r"\{", TokenKind::Open)
            .rule(r"\}", TokenKind::Close);
        let kinds: Vec<_> = lexicon.rules().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Open, TokenKind::Close]);
        assert_eq!(lexicon.len(), 2);
        assert!(!lexicon.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let lexicon: Lexicon = [("a", TokenKind::Block), ("b", TokenKind::Inline)]
            .into_iter()
            .collect();
        assert_eq!(lexicon.rules()[1], LexiconRule::new("b", TokenKind::Inline));
    }

    #[test]
    fn test_deserializes_from_rule_list() {
        let lexicon: Lexicon = serde_json::from_str(
            r#"[{"pattern": "\\{", "kind": "open"}, {"pattern": ";", "kind": "block"}]"#,
        )
        .unwrap();
        assert_eq!(
            lexicon,
            Lexicon::new()
                .rule(r"\{", TokenKind::Open)
                .rule(";", TokenKind::Block)
        );
    }
}
