//! # Surface Syntax Tree
//!
//! The parser produces a uniform tree with exactly two node kinds:
//!
//! - **Atom** - an opaque lexeme (`foo`, `42`, `"hello"`, `'a`, `+`)
//! - **List** - an ordered sequence of child nodes
//!
//! Reserved forms (`let`, `def`, `set`, `if`) are ordinary lists whose first
//! child happens to be a keyword atom; the type checker gives them meaning.
//! Every node carries the span of its source text so diagnostics can point
//! back at the offending characters.

/// A source region: 1-based `(line, column)` of the first character, and of
/// one past the last. The all-zero span marks synthetic nodes built in
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl Span {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        Span { start, end }
    }
}

/// A single lexeme together with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub value: String,
    pub position: Span,
}

/// A parenthesized sequence of nodes. The span covers the opening through
/// the closing parenthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub children: Vec<Node>,
    pub position: Span,
}

/// One node of the surface tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Atom(Atom),
    List(List),
}

impl Node {
    pub fn atom(value: impl Into<String>, position: Span) -> Self {
        Node::Atom(Atom {
            value: value.into(),
            position,
        })
    }

    pub fn list(children: Vec<Node>, position: Span) -> Self {
        Node::List(List { children, position })
    }

    pub fn position(&self) -> Span {
        match self {
            Node::Atom(atom) => atom.position,
            Node::List(list) => list.position,
        }
    }

    /// The atom behind this node, if it is one.
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Node::Atom(atom) => Some(atom),
            Node::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Node::Atom(_) => None,
            Node::List(list) => Some(list),
        }
    }

    /// True when this node is the atom `expected`.
    pub fn is_atom(&self, expected: &str) -> bool {
        matches!(self, Node::Atom(atom) if atom.value == expected)
    }
}
