//! Lexer (tokenizer) for C source code.
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser.  `#include` and other preprocessor directives are silently skipped
//! rather than parsed; the parser assumes preprocessed input.  Every stream
//! ends with an explicit [`TokenKind::Eof`] token, which the
//! compilation-unit rule consumes to finish.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::diagnostics::SourceLocation;

/// Token type tags.  Keywords, punctuators, literal classes, identifiers,
/// and the end-of-input marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Auto,
    Break,
    Case,
    CharType,
    Const,
    Continue,
    Default,
    Do,
    DoubleType,
    Else,
    Enum,
    Extern,
    FloatType,
    For,
    Goto,
    If,
    Inline,
    IntType,
    LongType,
    Register,
    Restrict,
    Return,
    ShortType,
    Signed,
    Sizeof,
    Static,
    Struct,
    Switch,
    Typedef,
    Union,
    Unsigned,
    VoidType,
    Volatile,
    While,
    Alignas,
    Alignof,
    Atomic,
    Bool,
    Complex,
    Noreturn,
    StaticAssert,
    ThreadLocal,
    // Microsoft extensions
    Declspec,
    Stdcall,

    // Punctuators
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Dot,
    RightArrow,
    Increment,
    Decrement,
    BitwiseAnd,
    BitwiseNot,
    Times,
    Plus,
    Minus,
    LogicalNot,
    Divide,
    Percent,
    BitwiseLeftShift,
    BitwiseRightShift,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    EqualsTo,
    NotEqualTo,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,
    QuestionMark,
    Colon,
    Semicolon,
    Ellipsis,
    Assign,
    TimesAssign,
    DivideAssign,
    ModuloAssign,
    PlusAssign,
    MinusAssign,
    BitwiseLeftShiftAssign,
    BitwiseRightShiftAssign,
    BitwiseAndAssign,
    BitwiseXorAssign,
    BitwiseOrAssign,
    Comma,

    // Literals
    IntegerConstant,
    OctIntegerConstant,
    HexIntegerConstant,
    FloatConstant,
    CharConstant,
    StringConstant,
    EncodingPrefix,

    Identifier,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Auto => "'auto'",
            TokenKind::Break => "'break'",
            TokenKind::Case => "'case'",
            TokenKind::CharType => "'char'",
            TokenKind::Const => "'const'",
            TokenKind::Continue => "'continue'",
            TokenKind::Default => "'default'",
            TokenKind::Do => "'do'",
            TokenKind::DoubleType => "'double'",
            TokenKind::Else => "'else'",
            TokenKind::Enum => "'enum'",
            TokenKind::Extern => "'extern'",
            TokenKind::FloatType => "'float'",
            TokenKind::For => "'for'",
            TokenKind::Goto => "'goto'",
            TokenKind::If => "'if'",
            TokenKind::Inline => "'inline'",
            TokenKind::IntType => "'int'",
            TokenKind::LongType => "'long'",
            TokenKind::Register => "'register'",
            TokenKind::Restrict => "'restrict'",
            TokenKind::Return => "'return'",
            TokenKind::ShortType => "'short'",
            TokenKind::Signed => "'signed'",
            TokenKind::Sizeof => "'sizeof'",
            TokenKind::Static => "'static'",
            TokenKind::Struct => "'struct'",
            TokenKind::Switch => "'switch'",
            TokenKind::Typedef => "'typedef'",
            TokenKind::Union => "'union'",
            TokenKind::Unsigned => "'unsigned'",
            TokenKind::VoidType => "'void'",
            TokenKind::Volatile => "'volatile'",
            TokenKind::While => "'while'",
            TokenKind::Alignas => "'_Alignas'",
            TokenKind::Alignof => "'_Alignof'",
            TokenKind::Atomic => "'_Atomic'",
            TokenKind::Bool => "'_Bool'",
            TokenKind::Complex => "'_Complex'",
            TokenKind::Noreturn => "'_Noreturn'",
            TokenKind::StaticAssert => "'_Static_assert'",
            TokenKind::ThreadLocal => "'_Thread_local'",
            TokenKind::Declspec => "'__declspec'",
            TokenKind::Stdcall => "'__stdcall'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Dot => "'.'",
            TokenKind::RightArrow => "'->'",
            TokenKind::Increment => "'++'",
            TokenKind::Decrement => "'--'",
            TokenKind::BitwiseAnd => "'&'",
            TokenKind::BitwiseNot => "'~'",
            TokenKind::Times => "'*'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::LogicalNot => "'!'",
            TokenKind::Divide => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::BitwiseLeftShift => "'<<'",
            TokenKind::BitwiseRightShift => "'>>'",
            TokenKind::LessThan => "'<'",
            TokenKind::GreaterThan => "'>'",
            TokenKind::LessEqual => "'<='",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::EqualsTo => "'=='",
            TokenKind::NotEqualTo => "'!='",
            TokenKind::BitwiseXor => "'^'",
            TokenKind::BitwiseOr => "'|'",
            TokenKind::LogicalAnd => "'&&'",
            TokenKind::LogicalOr => "'||'",
            TokenKind::QuestionMark => "'?'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Assign => "'='",
            TokenKind::TimesAssign => "'*='",
            TokenKind::DivideAssign => "'/='",
            TokenKind::ModuloAssign => "'%='",
            TokenKind::PlusAssign => "'+='",
            TokenKind::MinusAssign => "'-='",
            TokenKind::BitwiseLeftShiftAssign => "'<<='",
            TokenKind::BitwiseRightShiftAssign => "'>>='",
            TokenKind::BitwiseAndAssign => "'&='",
            TokenKind::BitwiseXorAssign => "'^='",
            TokenKind::BitwiseOrAssign => "'|='",
            TokenKind::Comma => "','",
            TokenKind::IntegerConstant => "integer constant",
            TokenKind::OctIntegerConstant => "octal integer constant",
            TokenKind::HexIntegerConstant => "hexadecimal integer constant",
            TokenKind::FloatConstant => "floating constant",
            TokenKind::CharConstant => "character constant",
            TokenKind::StringConstant => "string literal",
            TokenKind::EncodingPrefix => "encoding prefix",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// One lexed token: a type tag, the text it covers, and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub loc: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, loc: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            loc,
        }
    }
}

/// Lexer error type.
#[derive(Debug, Error)]
#[error("lex error at {loc}: {message}")]
pub struct LexError {
    pub message: String,
    pub loc: SourceLocation,
}

fn keyword_table() -> &'static FxHashMap<&'static str, TokenKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("auto", TokenKind::Auto);
        map.insert("break", TokenKind::Break);
        map.insert("case", TokenKind::Case);
        map.insert("char", TokenKind::CharType);
        map.insert("const", TokenKind::Const);
        map.insert("continue", TokenKind::Continue);
        map.insert("default", TokenKind::Default);
        map.insert("do", TokenKind::Do);
        map.insert("double", TokenKind::DoubleType);
        map.insert("else", TokenKind::Else);
        map.insert("enum", TokenKind::Enum);
        map.insert("extern", TokenKind::Extern);
        map.insert("float", TokenKind::FloatType);
        map.insert("for", TokenKind::For);
        map.insert("goto", TokenKind::Goto);
        map.insert("if", TokenKind::If);
        map.insert("inline", TokenKind::Inline);
        map.insert("int", TokenKind::IntType);
        map.insert("long", TokenKind::LongType);
        map.insert("register", TokenKind::Register);
        map.insert("restrict", TokenKind::Restrict);
        map.insert("return", TokenKind::Return);
        map.insert("short", TokenKind::ShortType);
        map.insert("signed", TokenKind::Signed);
        map.insert("sizeof", TokenKind::Sizeof);
        map.insert("static", TokenKind::Static);
        map.insert("struct", TokenKind::Struct);
        map.insert("switch", TokenKind::Switch);
        map.insert("typedef", TokenKind::Typedef);
        map.insert("union", TokenKind::Union);
        map.insert("unsigned", TokenKind::Unsigned);
        map.insert("void", TokenKind::VoidType);
        map.insert("volatile", TokenKind::Volatile);
        map.insert("while", TokenKind::While);
        map.insert("_Alignas", TokenKind::Alignas);
        map.insert("_Alignof", TokenKind::Alignof);
        map.insert("_Atomic", TokenKind::Atomic);
        map.insert("_Bool", TokenKind::Bool);
        map.insert("_Complex", TokenKind::Complex);
        map.insert("_Noreturn", TokenKind::Noreturn);
        map.insert("_Static_assert", TokenKind::StaticAssert);
        map.insert("_Thread_local", TokenKind::ThreadLocal);
        map.insert("__declspec", TokenKind::Declspec);
        map.insert("__stdcall", TokenKind::Stdcall);
        map
    })
}

/// Lexer for C source code.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, appending the terminating `Eof` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            if self.peek() == Some('#') {
                self.skip_preprocessor_directive();
                continue;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "unexpected end of input".to_string(),
            loc,
        })?;

        match ch {
            '"' => self.string_literal(loc),
            '\'' => self.char_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '+' => {
                if self.eat('+') {
                    Ok(Token::new(TokenKind::Increment, "++", loc))
                } else if self.eat('=') {
                    Ok(Token::new(TokenKind::PlusAssign, "+=", loc))
                } else {
                    Ok(Token::new(TokenKind::Plus, "+", loc))
                }
            }
            '-' => {
                if self.eat('-') {
                    Ok(Token::new(TokenKind::Decrement, "--", loc))
                } else if self.eat('=') {
                    Ok(Token::new(TokenKind::MinusAssign, "-=", loc))
                } else if self.eat('>') {
                    Ok(Token::new(TokenKind::RightArrow, "->", loc))
                } else {
                    Ok(Token::new(TokenKind::Minus, "-", loc))
                }
            }
            '*' => {
                if self.eat('=') {
                    Ok(Token::new(TokenKind::TimesAssign, "*=", loc))
                } else {
                    Ok(Token::new(TokenKind::Times, "*", loc))
                }
            }
            '/' => {
                if self.eat('=') {
                    Ok(Token::new(TokenKind::DivideAssign, "/=", loc))
                } else {
                    Ok(Token::new(TokenKind::Divide, "/", loc))
                }
            }
            '%' => {
                if self.eat('=') {
                    Ok(Token::new(TokenKind::ModuloAssign, "%=", loc))
                } else {
                    Ok(Token::new(TokenKind::Percent, "%", loc))
                }
            }
            '=' => {
                if self.eat('=') {
                    Ok(Token::new(TokenKind::EqualsTo, "==", loc))
                } else {
                    Ok(Token::new(TokenKind::Assign, "=", loc))
                }
            }
            '!' => {
                if self.eat('=') {
                    Ok(Token::new(TokenKind::NotEqualTo, "!=", loc))
                } else {
                    Ok(Token::new(TokenKind::LogicalNot, "!", loc))
                }
            }
            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        Ok(Token::new(TokenKind::BitwiseLeftShiftAssign, "<<=", loc))
                    } else {
                        Ok(Token::new(TokenKind::BitwiseLeftShift, "<<", loc))
                    }
                } else if self.eat('=') {
                    Ok(Token::new(TokenKind::LessEqual, "<=", loc))
                } else {
                    Ok(Token::new(TokenKind::LessThan, "<", loc))
                }
            }
            '>' => {
                if self.eat('>') {
                    if self.eat('=') {
                        Ok(Token::new(TokenKind::BitwiseRightShiftAssign, ">>=", loc))
                    } else {
                        Ok(Token::new(TokenKind::BitwiseRightShift, ">>", loc))
                    }
                } else if self.eat('=') {
                    Ok(Token::new(TokenKind::GreaterEqual, ">=", loc))
                } else {
                    Ok(Token::new(TokenKind::GreaterThan, ">", loc))
                }
            }
            '&' => {
                if self.eat('&') {
                    Ok(Token::new(TokenKind::LogicalAnd, "&&", loc))
                } else if self.eat('=') {
                    Ok(Token::new(TokenKind::BitwiseAndAssign, "&=", loc))
                } else {
                    Ok(Token::new(TokenKind::BitwiseAnd, "&", loc))
                }
            }
            '|' => {
                if self.eat('|') {
                    Ok(Token::new(TokenKind::LogicalOr, "||", loc))
                } else if self.eat('=') {
                    Ok(Token::new(TokenKind::BitwiseOrAssign, "|=", loc))
                } else {
                    Ok(Token::new(TokenKind::BitwiseOr, "|", loc))
                }
            }
            '^' => {
                if self.eat('=') {
                    Ok(Token::new(TokenKind::BitwiseXorAssign, "^=", loc))
                } else {
                    Ok(Token::new(TokenKind::BitwiseXor, "^", loc))
                }
            }
            '~' => Ok(Token::new(TokenKind::BitwiseNot, "~", loc)),
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.float_fraction(".".to_string(), loc)
                } else if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    Ok(Token::new(TokenKind::Ellipsis, "...", loc))
                } else {
                    Ok(Token::new(TokenKind::Dot, ".", loc))
                }
            }
            '?' => Ok(Token::new(TokenKind::QuestionMark, "?", loc)),
            ':' => Ok(Token::new(TokenKind::Colon, ":", loc)),
            ';' => Ok(Token::new(TokenKind::Semicolon, ";", loc)),
            ',' => Ok(Token::new(TokenKind::Comma, ",", loc)),
            '(' => Ok(Token::new(TokenKind::LeftParen, "(", loc)),
            ')' => Ok(Token::new(TokenKind::RightParen, ")", loc)),
            '{' => Ok(Token::new(TokenKind::LeftBrace, "{", loc)),
            '}' => Ok(Token::new(TokenKind::RightBrace, "}", loc)),
            '[' => Ok(Token::new(TokenKind::LeftBracket, "[", loc)),
            ']' => Ok(Token::new(TokenKind::RightBracket, "]", loc)),

            other => Err(LexError {
                message: format!("unexpected character '{}'", other),
                loc,
            }),
        }
    }

    fn identifier_or_keyword(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut text = String::from(first);
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // u8"...", u"...", U"...", L"..." split into a prefix token followed
        // by the string constant itself.
        if matches!(text.as_str(), "u8" | "u" | "U" | "L") && self.peek() == Some('"') {
            return Token::new(TokenKind::EncodingPrefix, text, loc);
        }

        match keyword_table().get(text.as_str()) {
            Some(&kind) => Token::new(kind, text, loc),
            None => Token::new(TokenKind::Identifier, text, loc),
        }
    }

    fn number_literal(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::from(first);

        if first == '0' {
            if let Some(x) = self.peek().filter(|&c| matches!(c, 'x' | 'X')) {
                self.advance();
                text.push(x);
                self.consume_while(&mut text, |c| c.is_ascii_hexdigit());
                if text.len() == 2 {
                    return Err(LexError {
                        message: "hexadecimal constant has no digits".to_string(),
                        loc,
                    });
                }
                self.consume_while(&mut text, |c| matches!(c, 'u' | 'U' | 'l' | 'L'));
                return Ok(Token::new(TokenKind::HexIntegerConstant, text, loc));
            }
        }

        self.consume_while(&mut text, |c| c.is_ascii_digit());

        if matches!(self.peek(), Some('.') | Some('e') | Some('E')) {
            if self.peek() == Some('.') {
                self.advance();
                text.push('.');
            }
            return self.float_fraction(text, loc);
        }

        let kind = if first == '0' && text.len() > 1 {
            TokenKind::OctIntegerConstant
        } else {
            TokenKind::IntegerConstant
        };
        self.consume_while(&mut text, |c| matches!(c, 'u' | 'U' | 'l' | 'L'));
        Ok(Token::new(kind, text, loc))
    }

    /// Continues a floating constant after its integer part (and optional
    /// dot) has been consumed into `text`.
    fn float_fraction(&mut self, mut text: String, loc: SourceLocation) -> Result<Token, LexError> {
        self.consume_while(&mut text, |c| c.is_ascii_digit());

        if let Some(e) = self.peek().filter(|&c| matches!(c, 'e' | 'E')) {
            self.advance();
            text.push(e);
            if let Some(sign) = self.peek().filter(|&c| matches!(c, '+' | '-')) {
                self.advance();
                text.push(sign);
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(LexError {
                    message: "exponent has no digits".to_string(),
                    loc,
                });
            }
            self.consume_while(&mut text, |c| c.is_ascii_digit());
        }

        if let Some(suffix) = self.peek().filter(|&c| matches!(c, 'f' | 'F' | 'l' | 'L')) {
            self.advance();
            text.push(suffix);
        }

        Ok(Token::new(TokenKind::FloatConstant, text, loc))
    }

    fn consume_while(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            text.push(c);
            self.advance();
        }
    }

    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexError {
                        message: "unterminated character constant".to_string(),
                        loc,
                    });
                }
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    text.push('\\');
                    self.advance();
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
        Ok(Token::new(TokenKind::CharConstant, text, loc))
    }

    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexError {
                        message: "unterminated string literal".to_string(),
                        loc,
                    });
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    text.push('\\');
                    self.advance();
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
        Ok(Token::new(TokenKind::StringConstant, text, loc))
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while self.peek().is_some() && self.peek() != Some('\n') {
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    let loc = self.current_location();
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            None => {
                                return Err(LexError {
                                    message: "unterminated block comment".to_string(),
                                    loc,
                                });
                            }
                            Some('*') if self.peek_next() == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            _ => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Skips a `#...` line, honoring backslash line continuations.
    fn skip_preprocessor_directive(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\\' && self.peek_next() == Some('\n') {
                self.advance();
                self.advance();
                continue;
            }
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    // ===== Cursor helpers =====

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied();
        if let Some(c) = c {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
