//! Syntax tree definitions.
//!
//! The parser produces one homogeneous node type: a kind tag, an optional
//! annotating token (present for leaves and keyword-headed constructs), and
//! an exclusively-owned, ordered list of children.  Pass-through grammar
//! layers are collapsed at construction time (see [`SyntaxTree::is_elidable`])
//! so that e.g. an expression containing a single assignment-expression does
//! not wrap it in a spurious node, while list- and declaration-shaped
//! containers keep a stable arity callers can rely on.

use std::fmt;
use std::io::{self, Write};

use super::lexer::Token;

/// Grammar node kinds.
///
/// `None` is the internal collector kind: a `None` node is never part of a
/// finished tree, its children are always spliced into the parent.
/// `Nothing` marks an elided-but-meaningful position, such as an absent
/// `for`-clause or an empty statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    None,
    Nothing,

    // Leaves
    Identifier,
    IdentifierList,
    IntegerConstant,
    FloatingConstant,
    CharacterConstant,
    EnumerationConstant,
    EncodingPrefix,
    StringLiteral,
    StringLiteralList,

    // Expressions
    ArgumentExpressionList,
    ArraySubscripting,
    FunctionCall,
    MemberAccess,
    PointerMemberAccess,
    PostfixIncrement,
    PostfixDecrement,
    CompoundLiteral,
    UnaryExpression,
    CastExpression,
    MultiplicativeExpression,
    AdditiveExpression,
    ShiftExpression,
    RelationalExpression,
    EqualityExpression,
    AndExpression,
    ExclusiveOrExpression,
    InclusiveOrExpression,
    LogicalAndExpression,
    LogicalOrExpression,
    ConditionalExpression,
    AssignmentExpression,
    Expression,

    // Declarations
    Declaration,
    DeclarationSpecifiers,
    InitDeclarator,
    StorageClassSpecifier,
    TypeSpecifier,
    StructOrUnionSpecifier,
    StructDeclaration,
    SpecifierQualifierList,
    StructDeclarator,
    EnumSpecifier,
    Enumerator,
    AtomicTypeSpecifier,
    TypeQualifier,
    TypeQualifierList,
    FunctionSpecifier,
    AlignmentSpecifier,
    Declarator,
    PointerDeclarator,
    ArrayDeclarator,
    ArrayStaticDeclarator,
    ArrayVLADeclarator,
    FunctionDeclarator,
    AbstractDeclarator,
    ParameterList,
    ParameterDeclaration,
    VariadicParameter,
    TypeName,
    InitializerList,
    Designation,
    StaticAssertDeclaration,

    // Statements and top level
    LabeledStatement,
    CompoundStatement,
    SelectionStatement,
    IterationStatement,
    JumpStatement,
    FunctionDefinition,
    DeclarationList,
    CompilationUnit,
    TranslationUnit,
}

impl NodeKind {
    /// Structural kinds are never elided, even with a single child: every
    /// `*List` kind plus the declaration-shaped containers.  Callers depend
    /// on their presence and arity.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            NodeKind::IdentifierList
                | NodeKind::StringLiteralList
                | NodeKind::ArgumentExpressionList
                | NodeKind::TypeQualifierList
                | NodeKind::SpecifierQualifierList
                | NodeKind::ParameterList
                | NodeKind::InitializerList
                | NodeKind::DeclarationList
                | NodeKind::Declaration
                | NodeKind::DeclarationSpecifiers
                | NodeKind::FunctionDeclarator
                | NodeKind::CompilationUnit
                | NodeKind::TranslationUnit
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // A collector node escaping into a finished tree is a parser
            // bug, not a user error.
            NodeKind::None => unreachable!("collector nodes have no display name"),
            NodeKind::Nothing => "empty",
            NodeKind::Identifier => "identifier",
            NodeKind::IdentifierList => "identifier list",
            NodeKind::IntegerConstant => "integer constant",
            NodeKind::FloatingConstant => "floating constant",
            NodeKind::CharacterConstant => "character constant",
            NodeKind::EnumerationConstant => "enumeration constant",
            NodeKind::EncodingPrefix => "encoding prefix",
            NodeKind::StringLiteral => "string literal",
            NodeKind::StringLiteralList => "string literal list",
            NodeKind::ArgumentExpressionList => "argument expression list",
            NodeKind::ArraySubscripting => "array subscripting",
            NodeKind::FunctionCall => "function call",
            NodeKind::MemberAccess => "member access",
            NodeKind::PointerMemberAccess => "pointer member access",
            NodeKind::PostfixIncrement => "postfix increment",
            NodeKind::PostfixDecrement => "postfix decrement",
            NodeKind::CompoundLiteral => "compound literal",
            NodeKind::UnaryExpression => "unary expression",
            NodeKind::CastExpression => "cast expression",
            NodeKind::MultiplicativeExpression => "multiplicative expression",
            NodeKind::AdditiveExpression => "additive expression",
            NodeKind::ShiftExpression => "shift expression",
            NodeKind::RelationalExpression => "relational expression",
            NodeKind::EqualityExpression => "equality expression",
            NodeKind::AndExpression => "and expression",
            NodeKind::ExclusiveOrExpression => "exclusive or expression",
            NodeKind::InclusiveOrExpression => "inclusive or expression",
            NodeKind::LogicalAndExpression => "logical and expression",
            NodeKind::LogicalOrExpression => "logical or expression",
            NodeKind::ConditionalExpression => "conditional expression",
            NodeKind::AssignmentExpression => "assignment expression",
            NodeKind::Expression => "expression",
            NodeKind::Declaration => "declaration",
            NodeKind::DeclarationSpecifiers => "declaration specifiers",
            NodeKind::InitDeclarator => "init declarator",
            NodeKind::StorageClassSpecifier => "storage class specifier",
            NodeKind::TypeSpecifier => "type specifier",
            NodeKind::StructOrUnionSpecifier => "struct or union specifier",
            NodeKind::StructDeclaration => "struct declaration",
            NodeKind::SpecifierQualifierList => "specifier qualifier list",
            NodeKind::StructDeclarator => "struct declarator",
            NodeKind::EnumSpecifier => "enum specifier",
            NodeKind::Enumerator => "enumerator",
            NodeKind::AtomicTypeSpecifier => "atomic type specifier",
            NodeKind::TypeQualifier => "type qualifier",
            NodeKind::TypeQualifierList => "type qualifier list",
            NodeKind::FunctionSpecifier => "function specifier",
            NodeKind::AlignmentSpecifier => "alignment specifier",
            NodeKind::Declarator => "declarator",
            NodeKind::PointerDeclarator => "pointer declarator",
            NodeKind::ArrayDeclarator => "array declarator",
            NodeKind::ArrayStaticDeclarator => "array (with static) declarator",
            NodeKind::ArrayVLADeclarator => "variable length array declarator",
            NodeKind::FunctionDeclarator => "function declarator",
            NodeKind::AbstractDeclarator => "abstract declarator",
            NodeKind::ParameterList => "parameter list",
            NodeKind::ParameterDeclaration => "parameter declaration",
            NodeKind::VariadicParameter => "'...' (variadic parameter)",
            NodeKind::TypeName => "type name",
            NodeKind::InitializerList => "initializer list",
            NodeKind::Designation => "designation",
            NodeKind::StaticAssertDeclaration => "static assert declaration",
            NodeKind::LabeledStatement => "labeled statement",
            NodeKind::CompoundStatement => "compound statement",
            NodeKind::SelectionStatement => "selection statement",
            NodeKind::IterationStatement => "iteration statement",
            NodeKind::JumpStatement => "jump statement",
            NodeKind::FunctionDefinition => "function definition",
            NodeKind::DeclarationList => "declaration list",
            NodeKind::CompilationUnit => "compilation unit",
            NodeKind::TranslationUnit => "translation unit",
        };
        f.write_str(text)
    }
}

/// One syntax tree node.  A parent exclusively owns its children; nodes are
/// never mutated after the rule that built them returns.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    kind: NodeKind,
    token: Option<Token>,
    children: Vec<SyntaxTree>,
}

impl SyntaxTree {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            token: None,
            children: Vec::new(),
        }
    }

    pub fn with_token(kind: NodeKind, token: Token) -> Self {
        Self {
            kind,
            token: Some(token),
            children: Vec::new(),
        }
    }

    /// The invisible accumulator used by repetition combinators; always
    /// spliced away when added to another node.
    pub fn collector() -> Self {
        Self::new(NodeKind::None)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.text.as_str())
    }

    pub fn has_text(&self) -> bool {
        self.token.is_some()
    }

    pub fn children(&self) -> &[SyntaxTree] {
        &self.children
    }

    pub fn child(&self, index: usize) -> &SyntaxTree {
        &self.children[index]
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn add_child(&mut self, child: SyntaxTree) {
        self.children.push(child);
    }

    /// Moves `other`'s children to the end of this node's child list,
    /// discarding `other` itself.
    pub fn splice_children(&mut self, other: SyntaxTree) {
        self.children.extend(other.children);
    }

    pub fn pop_child(&mut self) -> Option<SyntaxTree> {
        self.children.pop()
    }

    /// A node is elidable when it is a collector, or when it carries no
    /// token, has exactly one child, and its kind is not structural.
    pub fn is_elidable(&self) -> bool {
        if self.kind == NodeKind::None {
            return true;
        }
        if self.has_text() || self.kind.is_structural() {
            return false;
        }
        self.children.len() == 1
    }

    /// Pre-order debug dump: kind name, optional token text, two spaces of
    /// indentation per depth.
    pub fn dump<W: Write>(&self, out: &mut W, indent_level: usize) -> io::Result<()> {
        let indent = "  ".repeat(indent_level);
        let colon = if self.children.is_empty() { "" } else { ":" };

        match self.text() {
            Some(text) => writeln!(out, "{}{}({}){}", indent, self.kind, text, colon)?,
            None => writeln!(out, "{}{}{}", indent, self.kind, colon)?,
        }

        for child in &self.children {
            child.dump(out, indent_level + 1)?;
        }

        Ok(())
    }
}
