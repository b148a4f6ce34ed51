use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::ast::Flag;
use crate::types::PrimitiveType;

#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    Dot,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Equal,
    Star,

    Identifier(String),
    Integer(u64),
    FileName(String),

    Package,
    Import,
    From,
    TypeCollection,
    Interface,
    Extends,
    Version,
    Major,
    Minor,
    Typedef,
    Is,
    Attribute,
    Method,
    Broadcast,
    In,
    Out,
    Error,
    Enumeration,
    Struct,
    Array,
    Of,

    Selective,
    FireAndForget,
    Polymorphic,
    NoSubscriptions,
    ReadOnly,

    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Boolean,
    Float,
    Double,
    String,
    ByteBuffer,

    Erroneous(std::string::String),
    Eof,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Token> = {
        let mut m = HashMap::new();

        m.insert("package", Token::Package);
        m.insert("import", Token::Import);
        m.insert("from", Token::From);
        m.insert("typecollection", Token::TypeCollection);
        m.insert("interface", Token::Interface);
        m.insert("extends", Token::Extends);
        m.insert("version", Token::Version);
        m.insert("major", Token::Major);
        m.insert("minor", Token::Minor);
        m.insert("typedef", Token::Typedef);
        m.insert("is", Token::Is);
        m.insert("attribute", Token::Attribute);
        m.insert("method", Token::Method);
        m.insert("broadcast", Token::Broadcast);
        m.insert("in", Token::In);
        m.insert("out", Token::Out);
        m.insert("error", Token::Error);
        m.insert("enumeration", Token::Enumeration);
        m.insert("struct", Token::Struct);
        m.insert("array", Token::Array);
        m.insert("of", Token::Of);
        m.insert("selective", Token::Selective);
        m.insert("fireAndForget", Token::FireAndForget);
        m.insert("polymorphic", Token::Polymorphic);
        m.insert("noSubscriptions", Token::NoSubscriptions);
        m.insert("readonly", Token::ReadOnly);
        m.insert("Int8", Token::Int8);
        m.insert("Int16", Token::Int16);
        m.insert("Int32", Token::Int32);
        m.insert("Int64", Token::Int64);
        m.insert("UInt8", Token::UInt8);
        m.insert("UInt16", Token::UInt16);
        m.insert("UInt32", Token::UInt32);
        m.insert("UInt64", Token::UInt64);
        m.insert("Boolean", Token::Boolean);
        m.insert("Float", Token::Float);
        m.insert("Double", Token::Double);
        m.insert("String", Token::String);
        m.insert("ByteBuffer", Token::ByteBuffer);

        m
    };
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let literal = match self {
            Token::Dot => ".".to_owned(),
            Token::LeftBrace => "{".to_owned(),
            Token::RightBrace => "}".to_owned(),
            Token::LeftBracket => "[".to_owned(),
            Token::RightBracket => "]".to_owned(),
            Token::Equal => "=".to_owned(),
            Token::Star => "*".to_owned(),
            Token::Identifier(v) => v.to_owned(),
            Token::Integer(v) => v.to_string(),
            Token::FileName(v) => format!("\"{}\"", v),
            Token::Package => "package".to_owned(),
            Token::Import => "import".to_owned(),
            Token::From => "from".to_owned(),
            Token::TypeCollection => "typecollection".to_owned(),
            Token::Interface => "interface".to_owned(),
            Token::Extends => "extends".to_owned(),
            Token::Version => "version".to_owned(),
            Token::Major => "major".to_owned(),
            Token::Minor => "minor".to_owned(),
            Token::Typedef => "typedef".to_owned(),
            Token::Is => "is".to_owned(),
            Token::Attribute => "attribute".to_owned(),
            Token::Method => "method".to_owned(),
            Token::Broadcast => "broadcast".to_owned(),
            Token::In => "in".to_owned(),
            Token::Out => "out".to_owned(),
            Token::Error => "error".to_owned(),
            Token::Enumeration => "enumeration".to_owned(),
            Token::Struct => "struct".to_owned(),
            Token::Array => "array".to_owned(),
            Token::Of => "of".to_owned(),
            Token::Selective => "selective".to_owned(),
            Token::FireAndForget => "fireAndForget".to_owned(),
            Token::Polymorphic => "polymorphic".to_owned(),
            Token::NoSubscriptions => "noSubscriptions".to_owned(),
            Token::ReadOnly => "readonly".to_owned(),
            Token::Int8 => "Int8".to_owned(),
            Token::Int16 => "Int16".to_owned(),
            Token::Int32 => "Int32".to_owned(),
            Token::Int64 => "Int64".to_owned(),
            Token::UInt8 => "UInt8".to_owned(),
            Token::UInt16 => "UInt16".to_owned(),
            Token::UInt32 => "UInt32".to_owned(),
            Token::UInt64 => "UInt64".to_owned(),
            Token::Boolean => "Boolean".to_owned(),
            Token::Float => "Float".to_owned(),
            Token::Double => "Double".to_owned(),
            Token::String => "String".to_owned(),
            Token::ByteBuffer => "ByteBuffer".to_owned(),
            Token::Erroneous(v) => v.to_owned(),
            Token::Eof => "EOF".to_owned(),
        };

        f.write_str(&literal)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum TokenKind {
    Dot,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Equal,
    Star,

    Identifier,
    Integer,
    FileName,

    Package,
    Import,
    From,
    TypeCollection,
    Interface,
    Extends,
    Version,
    Major,
    Minor,
    Typedef,
    Is,
    Attribute,
    Method,
    Broadcast,
    In,
    Out,
    Error,
    Enumeration,
    Struct,
    Array,
    Of,

    Selective,
    FireAndForget,
    Polymorphic,
    NoSubscriptions,
    ReadOnly,

    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Boolean,
    Float,
    Double,
    String,
    ByteBuffer,

    Erroneous,
    Eof,
}

impl FromStr for Token {
    type Err = std::string::String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match KEYWORDS.get(s) {
            Some(token) => Ok(token.clone()),
            None => Err(format!("Not a valid keyword: {}", s)),
        }
    }
}

impl TryInto<PrimitiveType> for &Token {
    type Error = std::string::String;

    fn try_into(self) -> Result<PrimitiveType, Self::Error> {
        Ok(match self {
            Token::Int8 => PrimitiveType::Int8,
            Token::Int16 => PrimitiveType::Int16,
            Token::Int32 => PrimitiveType::Int32,
            Token::Int64 => PrimitiveType::Int64,
            Token::UInt8 => PrimitiveType::UInt8,
            Token::UInt16 => PrimitiveType::UInt16,
            Token::UInt32 => PrimitiveType::UInt32,
            Token::UInt64 => PrimitiveType::UInt64,
            Token::Boolean => PrimitiveType::Boolean,
            Token::Float => PrimitiveType::Float,
            Token::Double => PrimitiveType::Double,
            Token::String => PrimitiveType::String,
            Token::ByteBuffer => PrimitiveType::ByteBuffer,
            v => return Err(format!("Expected a primitive type but got '{}'", v)),
        })
    }
}

impl TryInto<Flag> for &Token {
    type Error = std::string::String;

    fn try_into(self) -> Result<Flag, Self::Error> {
        Ok(match self {
            Token::Selective => Flag::Selective,
            Token::FireAndForget => Flag::FireAndForget,
            Token::Polymorphic => Flag::Polymorphic,
            Token::NoSubscriptions => Flag::NoSubscriptions,
            Token::ReadOnly => Flag::ReadOnly,
            v => return Err(format!("Expected a flag but got '{}'", v)),
        })
    }
}

impl From<&Token> for TokenKind {
    fn from(value: &Token) -> Self {
        match value {
            Token::Dot => TokenKind::Dot,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::LeftBracket => TokenKind::LeftBracket,
            Token::RightBracket => TokenKind::RightBracket,
            Token::Equal => TokenKind::Equal,
            Token::Star => TokenKind::Star,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Integer(_) => TokenKind::Integer,
            Token::FileName(_) => TokenKind::FileName,
            Token::Package => TokenKind::Package,
            Token::Import => TokenKind::Import,
            Token::From => TokenKind::From,
            Token::TypeCollection => TokenKind::TypeCollection,
            Token::Interface => TokenKind::Interface,
            Token::Extends => TokenKind::Extends,
            Token::Version => TokenKind::Version,
            Token::Major => TokenKind::Major,
            Token::Minor => TokenKind::Minor,
            Token::Typedef => TokenKind::Typedef,
            Token::Is => TokenKind::Is,
            Token::Attribute => TokenKind::Attribute,
            Token::Method => TokenKind::Method,
            Token::Broadcast => TokenKind::Broadcast,
            Token::In => TokenKind::In,
            Token::Out => TokenKind::Out,
            Token::Error => TokenKind::Error,
            Token::Enumeration => TokenKind::Enumeration,
            Token::Struct => TokenKind::Struct,
            Token::Array => TokenKind::Array,
            Token::Of => TokenKind::Of,
            Token::Selective => TokenKind::Selective,
            Token::FireAndForget => TokenKind::FireAndForget,
            Token::Polymorphic => TokenKind::Polymorphic,
            Token::NoSubscriptions => TokenKind::NoSubscriptions,
            Token::ReadOnly => TokenKind::ReadOnly,
            Token::Int8 => TokenKind::Int8,
            Token::Int16 => TokenKind::Int16,
            Token::Int32 => TokenKind::Int32,
            Token::Int64 => TokenKind::Int64,
            Token::UInt8 => TokenKind::UInt8,
            Token::UInt16 => TokenKind::UInt16,
            Token::UInt32 => TokenKind::UInt32,
            Token::UInt64 => TokenKind::UInt64,
            Token::Boolean => TokenKind::Boolean,
            Token::Float => TokenKind::Float,
            Token::Double => TokenKind::Double,
            Token::String => TokenKind::String,
            Token::ByteBuffer => TokenKind::ByteBuffer,
            Token::Erroneous(_) => TokenKind::Erroneous,
            Token::Eof => TokenKind::Eof,
        }
    }
}

impl From<&crate::pos::WithTokenMetadata<Token>> for TokenKind {
    fn from(t: &crate::pos::WithTokenMetadata<Token>) -> Self {
        TokenKind::from(&t.value)
    }
}
