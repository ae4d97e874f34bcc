// src/parser/descent.rs
// Recursive-descent parser for the grammar language:
//
//   Grammar          -> ProductionList EOF
//   ProductionList   -> ProductionSet ';' ProductionList'
//   ProductionList'  -> ProductionSet ';' ProductionList'  | ε (before EOF)
//   ProductionSet    -> SYMBOL ':' RightHandSide ProductionSet'
//   ProductionSet'   -> '|' RightHandSide ProductionSet'   | ε (before ';')
//   RightHandSide    -> SymbolList | EPSILON
//   SymbolList       -> SYMBOL SymbolList'
//   SymbolList'      -> SYMBOL SymbolList'                 | ε (before ';' or '|')
//
// The primed rules are right-recursive tails; they are expanded in a loop and
// the nested nodes linked afterwards, so call depth stays constant in the
// number of productions and symbols.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::tree::Node;
use crate::lexer::{cpu::Token, tables::tokens::TokenKind};

/// Descent states, one per nonterminal of the grammar language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rule {
    Grammar,
    ProductionList,
    ProductionListP,
    ProductionSet,
    ProductionSetP,
    RightHandSide,
    SymbolList,
    SymbolListP,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Grammar => "Grammar",
            Rule::ProductionList => "ProductionList",
            Rule::ProductionListP => "ProductionList'",
            Rule::ProductionSet => "ProductionSet",
            Rule::ProductionSetP => "ProductionSet'",
            Rule::RightHandSide => "RightHandSide",
            Rule::SymbolList => "SymbolList",
            Rule::SymbolListP => "SymbolList'",
        }
    }

    /// Lookaheads before which the rule may derive nothing.
    pub fn empty_before(self) -> &'static [TokenKind] {
        match self {
            Rule::ProductionListP => &[TokenKind::Eof],
            Rule::ProductionSetP => &[TokenKind::Semicolon],
            Rule::SymbolListP => &[TokenKind::Semicolon, TokenKind::AlsoDerives],
            _ => &[],
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: expected {expected}, got {got} {text:?}")]
pub struct ParseError {
    pub expected: Rule,
    pub got: TokenKind,
    pub line: u32,
    pub text: String,
    /// Rules being expanded when the parse failed, outermost first.
    pub stack: Vec<Rule>,
}

type PResult<T> = Result<T, ParseError>;

pub struct Parser<'t> {
    tokens: &'t [Token],
    index: usize,
    expected: Vec<Rule>,
    eof: Token,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let line = tokens.last().map_or(1, |t| t.line);
        Self {
            tokens,
            index: 0,
            expected: Vec::new(),
            eof: Token::eof(line),
        }
    }

    /// Consumes the token stream through EOF and returns the `Grammar` node.
    pub fn parse(mut self) -> PResult<Node> {
        self.grammar()
    }

    /// Current lookahead; a stream without EOF behaves as if it had one.
    fn word(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.word().kind == kind
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    fn enter(&mut self, rule: Rule) -> Node {
        log::trace!("[parse] enter {rule} at {:?}", self.word().value);
        self.expected.push(rule);
        Node::rule(rule)
    }

    fn leave(&mut self, node: Node) -> PResult<Node> {
        self.expected.pop();
        Ok(node)
    }

    fn fail<T>(&self) -> PResult<T> {
        let word = self.word();
        let err = ParseError {
            expected: self.expected.last().copied().unwrap_or(Rule::Grammar),
            got: word.kind,
            line: word.line,
            text: word.value.clone(),
            stack: self.expected.clone(),
        };
        log::debug!("[parse] {err}; stack={:?}", err.stack);
        Err(err)
    }

    /// Appends the current token as a leaf if it has `kind`.
    fn expect(&mut self, node: &mut Node, kind: TokenKind) -> PResult<()> {
        if !self.at(kind) {
            return self.fail();
        }
        let word = self.word();
        node.push(Node::leaf(kind, word.value.clone()));
        self.advance();
        Ok(())
    }

    /// True when the innermost rule may end here without consuming input.
    fn epsilon_allowed(&self) -> bool {
        self.expected
            .last()
            .is_some_and(|rule| rule.empty_before().contains(&self.word().kind))
    }

    /// Expands `rule -> body rule | ε` iteratively. Every round enters `rule`
    /// again, so a failure carries the same stack as the nested expansion.
    fn tail(
        &mut self,
        rule: Rule,
        mut body: impl FnMut(&mut Self, &mut Node) -> PResult<()>,
    ) -> PResult<Node> {
        let depth = self.expected.len();
        let mut outer = Vec::new();
        let mut nested = loop {
            let mut node = self.enter(rule);
            if self.epsilon_allowed() {
                break node;
            }
            body(self, &mut node)?;
            outer.push(node);
        };
        self.expected.truncate(depth);
        while let Some(mut node) = outer.pop() {
            node.push(nested);
            nested = node;
        }
        Ok(nested)
    }

    fn grammar(&mut self) -> PResult<Node> {
        let mut node = self.enter(Rule::Grammar);
        node.push(self.production_list()?);
        self.expect(&mut node, TokenKind::Eof)?;
        self.leave(node)
    }

    fn production_list(&mut self) -> PResult<Node> {
        let mut node = self.enter(Rule::ProductionList);
        node.push(self.production_set()?);
        self.expect(&mut node, TokenKind::Semicolon)?;
        node.push(self.production_list_p()?);
        self.leave(node)
    }

    fn production_list_p(&mut self) -> PResult<Node> {
        self.tail(Rule::ProductionListP, |p, node| {
            node.push(p.production_set()?);
            p.expect(node, TokenKind::Semicolon)
        })
    }

    fn production_set(&mut self) -> PResult<Node> {
        let mut node = self.enter(Rule::ProductionSet);
        self.expect(&mut node, TokenKind::Symbol)?;
        self.expect(&mut node, TokenKind::Derives)?;
        node.push(self.right_hand_side()?);
        node.push(self.production_set_p()?);
        self.leave(node)
    }

    fn production_set_p(&mut self) -> PResult<Node> {
        self.tail(Rule::ProductionSetP, |p, node| {
            p.expect(node, TokenKind::AlsoDerives)?;
            node.push(p.right_hand_side()?);
            Ok(())
        })
    }

    fn right_hand_side(&mut self) -> PResult<Node> {
        let mut node = self.enter(Rule::RightHandSide);
        match self.word().kind {
            TokenKind::Epsilon => self.expect(&mut node, TokenKind::Epsilon)?,
            TokenKind::Symbol => node.push(self.symbol_list()?),
            _ => return self.fail(),
        }
        self.leave(node)
    }

    fn symbol_list(&mut self) -> PResult<Node> {
        let mut node = self.enter(Rule::SymbolList);
        self.expect(&mut node, TokenKind::Symbol)?;
        node.push(self.symbol_list_p()?);
        self.leave(node)
    }

    fn symbol_list_p(&mut self) -> PResult<Node> {
        self.tail(Rule::SymbolListP, |p, node| p.expect(node, TokenKind::Symbol))
    }
}

pub fn parse(tokens: &[Token]) -> PResult<Node> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(kinds: &[(TokenKind, &str)]) -> Vec<Token> {
        kinds.iter().map(|&(k, v)| Token::new(v, k, 1)).collect()
    }

    #[test]
    fn epsilon_contexts() {
        assert!(Rule::SymbolListP.empty_before().contains(&TokenKind::AlsoDerives));
        assert!(!Rule::ProductionSetP.empty_before().contains(&TokenKind::AlsoDerives));
        assert!(Rule::ProductionSet.empty_before().is_empty());
    }

    #[test]
    fn missing_eof_is_synthesized() {
        use TokenKind::*;
        let tokens = toks(&[(Symbol, "A"), (Derives, ":"), (Symbol, "a"), (Semicolon, ";")]);
        let tree = parse(&tokens).unwrap();
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn tail_nests_to_the_right() {
        use TokenKind::*;
        let tokens = toks(&[
            (Symbol, "A"),
            (Derives, ":"),
            (Symbol, "a"),
            (Symbol, "b"),
            (Symbol, "c"),
            (Semicolon, ";"),
        ]);
        let tree = parse(&tokens).unwrap();
        // Grammar > ProductionList > ProductionSet > RightHandSide > SymbolList
        let list = &tree.children[0].children[0].children[2].children[0];
        let mut tail = &list.children[1];
        let mut seen = Vec::new();
        while let [leaf, rest] = tail.children.as_slice() {
            assert_eq!(tail.tag, crate::parser::Tag::Rule(Rule::SymbolListP));
            seen.push(leaf.label.as_str());
            tail = rest;
        }
        assert!(tail.children.is_empty());
        assert_eq!(seen, vec!["b", "c"]);
    }

    #[test]
    fn deep_tail_failure_keeps_nested_stack() {
        use TokenKind::*;
        let tokens = toks(&[
            (Symbol, "A"),
            (Derives, ":"),
            (Symbol, "a"),
            (Symbol, "b"),
            (Derives, ":"),
        ]);
        let err = parse(&tokens).unwrap_err();
        assert_eq!(err.expected, Rule::SymbolListP);
        assert_eq!(
            &err.stack[err.stack.len() - 2..],
            &[Rule::SymbolListP, Rule::SymbolListP]
        );
    }
}
