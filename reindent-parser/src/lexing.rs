//! Lexer
//!
//!     Turns a source string into a flat, ordered list of [`Token`]s.
//!
//!     All lexicon patterns are compiled once into a single alternation, each pattern
//!     wrapped in its own named group so the matching rule (and therefore the token
//!     kind) can be read back from the captures. The regex crate's leftmost-first
//!     semantics give the tie-break we want: the earliest match position wins, and among
//!     patterns starting there, the one declared first.
//!
//! Algorithm
//!
//!     1. Search the unconsumed suffix for the leftmost match of any pattern.
//!     2. Nothing matches: the whole suffix becomes one text token, done.
//!     3. Text before the match becomes a text token.
//!     4. The match becomes a token of the rule's kind.
//!     5. Advance past the match and repeat until the suffix is empty.
//!
//!     The search runs on the suffix, so `^` anchors at the cursor. Zero-width matches
//!     never become tokens: where the alternation only finds an empty match, each rule
//!     is tried alone at that position and the first non-empty match wins; failing
//!     that, the search resumes one character later. Concatenating the
//!     data of the emitted tokens always gives back the input.

pub mod lexicon;

pub use lexicon::{Lexicon, LexiconRule};

use crate::error::ScannerError;
use crate::scanner::ScannerOptions;
use crate::token::{Token, TokenKind};
use log::{debug, trace};
use regex::{Captures, Regex, RegexBuilder};
use std::ops::Range;

/// A lexicon compiled into one prioritized alternation.
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    regex: Option<Regex>,
    /// Capture group index and kind of every rule, in declaration order.
    groups: Vec<(usize, TokenKind)>,
    /// Every rule compiled alone, for positions where the alternation only finds an
    /// empty match.
    rules: Vec<(Regex, TokenKind)>,
    text_kind: TokenKind,
}

fn group_name(index: usize) -> String {
    format!("__rule{index}")
}

fn builder(pattern: &str, options: &ScannerOptions) -> RegexBuilder {
    let mut builder = RegexBuilder::new(pattern);
    builder
        .case_insensitive(options.case_insensitive)
        .dot_matches_new_line(options.dot_matches_new_line)
        .multi_line(options.multi_line);
    builder
}

impl CompiledLexicon {
    /// Validate every rule and build the alternation.
    pub fn compile(lexicon: &Lexicon, options: &ScannerOptions) -> Result<Self, ScannerError> {
        if options.text_kind == TokenKind::Root {
            return Err(ScannerError::InvalidTextKind(options.text_kind));
        }

        let mut alternatives = Vec::with_capacity(lexicon.len());
        let mut rules = Vec::with_capacity(lexicon.len());
        for (index, rule) in lexicon.rules().iter().enumerate() {
            if rule.kind == TokenKind::Root {
                return Err(ScannerError::RootRule {
                    index,
                    pattern: rule.pattern.clone(),
                });
            }
            // Compiled alone first so a bad pattern is reported against its own rule.
            let alone = builder(&rule.pattern, options)
                .build()
                .map_err(|source| ScannerError::InvalidPattern {
                    index,
                    pattern: rule.pattern.clone(),
                    source: Box::new(source),
                })?;
            rules.push((alone, rule.kind));
            alternatives.push(format!("(?P<{}>{})", group_name(index), rule.pattern));
        }

        if alternatives.is_empty() {
            debug!(text_kind:% = options.text_kind; "Compiled empty lexicon");
            return Ok(CompiledLexicon {
                regex: None,
                groups: Vec::new(),
                rules,
                text_kind: options.text_kind,
            });
        }

        let regex = builder(&alternatives.join("|"), options)
            .build()
            .map_err(|source| ScannerError::InvalidLexicon(Box::new(source)))?;

        let names: Vec<_> = regex.capture_names().collect();
        let groups = lexicon
            .rules()
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                let name = group_name(index);
                names
                    .iter()
                    .position(|n| *n == Some(name.as_str()))
                    .map(|group| (group, rule.kind))
            })
            .collect();

        debug!(rules = lexicon.len(), text_kind:% = options.text_kind; "Compiled lexicon");
        Ok(CompiledLexicon {
            regex: Some(regex),
            groups,
            rules,
            text_kind: options.text_kind,
        })
    }

    /// Kind given to spans no rule matches.
    pub fn text_kind(&self) -> TokenKind {
        self.text_kind
    }

    /// Split `source` into tokens. Never fails: unmatched spans become text tokens.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut cursor = 0;

        while cursor < source.len() {
            let rest = &source[cursor..];
            let Some((found, kind)) = self.find(rest) else {
                tokens.push(Token::new(self.text_kind, rest, cursor..source.len()));
                break;
            };

            if found.start > 0 {
                tokens.push(Token::new(
                    self.text_kind,
                    &rest[..found.start],
                    cursor..cursor + found.start,
                ));
            }
            tokens.push(Token::new(
                kind,
                &rest[found.clone()],
                cursor + found.start..cursor + found.end,
            ));
            cursor += found.end;
        }

        trace!(bytes = source.len(), tokens = tokens.len(); "Tokenized source");
        tokens
    }

    /// Leftmost non-empty match in `rest` and the kind of the rule that produced it.
    fn find(&self, rest: &str) -> Option<(Range<usize>, TokenKind)> {
        let regex = self.regex.as_ref()?;
        let mut at = 0;
        while at <= rest.len() {
            let captures = regex.captures_at(rest, at)?;
            let whole = captures.get(0)?;
            if !whole.is_empty() {
                return self.kind_of(&captures).map(|kind| (whole.range(), kind));
            }
            if let Some(found) = self.first_non_empty_at(rest, whole.start()) {
                return Some(found);
            }
            at = whole.end() + rest[whole.end()..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    /// First rule, in declaration order, with a non-empty match starting exactly at `at`.
    fn first_non_empty_at(&self, rest: &str, at: usize) -> Option<(Range<usize>, TokenKind)> {
        self.rules.iter().find_map(|(regex, kind)| {
            regex
                .find_at(rest, at)
                .filter(|m| m.start() == at && !m.is_empty())
                .map(|m| (m.range(), *kind))
        })
    }

    fn kind_of(&self, captures: &Captures<'_>) -> Option<TokenKind> {
        self.groups
            .iter()
            .find(|(group, _)| captures.get(*group).is_some())
            .map(|(_, kind)| *kind)
    }
}

/// Tokenize with default options. Fails only if the lexicon is invalid.
pub fn tokenize(source: &str, lexicon: &Lexicon) -> Result<Vec<Token>, ScannerError> {
    let compiled = CompiledLexicon::compile(lexicon, &ScannerOptions::default())?;
    Ok(compiled.tokenize(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_data(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.data.as_str())).collect()
    }

    fn css() -> Lexicon {
        Lexicon::new()
            .rule(r"\s*\n+\s*", TokenKind::Whitespace)
            .rule(r"\{", TokenKind::Open)
            .rule(r"\}", TokenKind::Close)
            .rule(r"[\w-]+\s*:\s*[^;]+;", TokenKind::Block)
    }

    #[test]
    fn test_tokenize_css_rule() {
        let tokens = tokenize("a {color:red;}", &css()).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![
                (TokenKind::Text, "a "),
                (TokenKind::Open, "{"),
                (TokenKind::Block, "color:red;"),
                (TokenKind::Close, "}"),
            ]
        );
        assert_eq!(tokens[1].span, 2..3);
        assert_eq!(tokens[3].span, 13..14);
    }

    #[test]
    fn test_unmatched_tail_becomes_text() {
        let tokens = tokenize("{ trailing", &css()).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![(TokenKind::Open, "{"), (TokenKind::Text, " trailing")]
        );
    }

    #[test]
    fn test_earlier_rule_wins_at_same_position() {
        let lexicon = Lexicon::new()
            .rule("ab", TokenKind::Block)
            .rule("abc", TokenKind::Inline);
        let tokens = tokenize("abc", &lexicon).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![(TokenKind::Block, "ab"), (TokenKind::Text, "c")]
        );
    }

    #[test]
    fn test_leftmost_position_beats_declaration_order() {
        let lexicon = Lexicon::new()
            .rule("c", TokenKind::Block)
            .rule("b", TokenKind::Inline);
        let tokens = tokenize("abc", &lexicon).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![
                (TokenKind::Text, "a"),
                (TokenKind::Inline, "b"),
                (TokenKind::Block, "c"),
            ]
        );
    }

    #[test]
    fn test_user_capture_groups_do_not_confuse_kinds() {
        let lexicon = Lexicon::new()
            .rule(r"(<)(!)--", TokenKind::Block)
            .rule(r"(a)(b)?", TokenKind::Open);
        let tokens = tokenize("<!--a", &lexicon).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![(TokenKind::Block, "<!--"), (TokenKind::Open, "a")]
        );
    }

    #[test]
    fn test_zero_width_matches_are_skipped() {
        let lexicon = Lexicon::new()
            .rule("x*", TokenKind::Block)
            .rule(r"\b", TokenKind::Inline);
        let tokens = tokenize("ab xx", &lexicon).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![(TokenKind::Text, "ab "), (TokenKind::Block, "xx")]
        );
    }

    #[test]
    fn test_empty_match_does_not_shadow_later_rules() {
        let lexicon = Lexicon::new()
            .rule(r"[ \t]*", TokenKind::Whitespace)
            .rule(r"\{", TokenKind::Open)
            .rule(r"\}", TokenKind::Close);
        let tokens = tokenize("{}", &lexicon).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![(TokenKind::Open, "{"), (TokenKind::Close, "}")]
        );

        let tokens = tokenize("{ \t}x", &lexicon).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![
                (TokenKind::Open, "{"),
                (TokenKind::Whitespace, " \t"),
                (TokenKind::Close, "}"),
                (TokenKind::Text, "x"),
            ]
        );
    }

    #[test]
    fn test_anchor_matches_at_cursor() {
        let lexicon = Lexicon::new()
            .rule("^a", TokenKind::Block)
            .rule("b", TokenKind::Inline);
        let tokens = tokenize("baa", &lexicon).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![
                (TokenKind::Inline, "b"),
                (TokenKind::Block, "a"),
                (TokenKind::Block, "a"),
            ]
        );
    }

    #[test]
    fn test_empty_lexicon_and_empty_source() {
        let tokens = tokenize("anything", &Lexicon::new()).unwrap();
        assert_eq!(kinds_and_data(&tokens), vec![(TokenKind::Text, "anything")]);
        assert!(tokenize("", &css()).unwrap().is_empty());
    }

    #[test]
    fn test_multibyte_text_spans() {
        let tokens = tokenize("é{ü}", &css()).unwrap();
        assert_eq!(
            kinds_and_data(&tokens),
            vec![
                (TokenKind::Text, "é"),
                (TokenKind::Open, "{"),
                (TokenKind::Text, "ü"),
                (TokenKind::Close, "}"),
            ]
        );
        assert_eq!(tokens[2].span, 3..5);
    }

    #[test]
    fn test_options_change_matching() {
        let lexicon = Lexicon::new().rule("<a>", TokenKind::Open);
        let options = ScannerOptions {
            case_insensitive: true,
            ..ScannerOptions::default()
        };
        let compiled = CompiledLexicon::compile(&lexicon, &options).unwrap();
        let tokens = compiled.tokenize("<A>");
        assert_eq!(kinds_and_data(&tokens), vec![(TokenKind::Open, "<A>")]);

        let options = ScannerOptions {
            text_kind: TokenKind::Block,
            ..ScannerOptions::default()
        };
        let compiled = CompiledLexicon::compile(&lexicon, &options).unwrap();
        assert_eq!(compiled.text_kind(), TokenKind::Block);
        let tokens = compiled.tokenize("x<a>");
        assert_eq!(
            kinds_and_data(&tokens),
            vec![(TokenKind::Block, "x"), (TokenKind::Open, "<a>")]
        );
    }

    #[test]
    fn test_invalid_pattern_is_reported_with_its_index() {
        let lexicon = Lexicon::new()
            .rule("ok", TokenKind::Block)
            .rule("(unclosed", TokenKind::Open);
        match tokenize("", &lexicon) {
            Err(ScannerError::InvalidPattern { index, pattern, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("Expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_group_names_across_rules() {
        let lexicon = Lexicon::new()
            .rule("(?P<q>a)", TokenKind::Block)
            .rule("(?P<q>b)", TokenKind::Block);
        assert!(matches!(
            tokenize("", &lexicon),
            Err(ScannerError::InvalidLexicon(_))
        ));
    }

    #[test]
    fn test_root_kind_is_rejected() {
        let lexicon = Lexicon::new().rule("x", TokenKind::Root);
        assert!(matches!(
            tokenize("x", &lexicon),
            Err(ScannerError::RootRule { index: 0, .. })
        ));

        let options = ScannerOptions {
            text_kind: TokenKind::Root,
            ..ScannerOptions::default()
        };
        assert!(matches!(
            CompiledLexicon::compile(&Lexicon::new(), &options),
            Err(ScannerError::InvalidTextKind(TokenKind::Root))
        ));
    }
}
