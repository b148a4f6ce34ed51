use crate::{
    ast::{
        Argument, Attribute, Broadcast, Definition, Enumeration, Enumerator, Flag, Import,
        Interface, Map, Method, Package, Struct, StructField, Typedef, TypeCollection, Version,
    },
    error::ParseError,
    pos::WithTokenMetadata,
    token::{Token, TokenKind},
    types::{Array, PrimitiveType, Type},
};

static EOF_TOKEN: WithTokenMetadata<Token> = WithTokenMetadata::empty(Token::Eof);

static DEFINITION_KEYWORDS: [TokenKind; 4] = [
    TokenKind::Package,
    TokenKind::Import,
    TokenKind::TypeCollection,
    TokenKind::Interface,
];
static FLAG_KEYWORDS: [TokenKind; 5] = [
    TokenKind::Selective,
    TokenKind::FireAndForget,
    TokenKind::Polymorphic,
    TokenKind::NoSubscriptions,
    TokenKind::ReadOnly,
];

/// One recognized container member, before aggregation sorts it into the
/// container's typed buckets.
enum Member {
    Version(Version),
    Attribute(Attribute),
    Method(Method),
    Broadcast(Broadcast),
    Typedef(Typedef),
    Enumeration(Enumeration),
    Struct(Struct),
    Array(Array),
}

/// One recognized `in`/`out`/`error` block of a method or broadcast body.
enum ArgGroup {
    In(Vec<Argument>),
    Out(Vec<Argument>),
    Error(Vec<Enumerator>),
}

#[derive(Default)]
struct ContainerMembers {
    version: Option<Version>,
    attributes: Vec<Attribute>,
    methods: Vec<Method>,
    broadcasts: Vec<Broadcast>,
    typedefs: Vec<Typedef>,
    enumerations: Vec<Enumeration>,
    structs: Vec<Struct>,
    arrays: Vec<Array>,
    maps: Vec<Map>,
}

fn err_at(t: &WithTokenMetadata<Token>, message: &str) -> ParseError {
    ParseError::Syntax {
        message: message.to_owned(),
        lexeme: t.value.to_string(),
        line: t.pos.line,
    }
}

fn structural(container: &str, message: &str) -> ParseError {
    ParseError::Structural {
        container: container.to_owned(),
        message: message.to_owned(),
    }
}

/// Partitions a container body into the per-kind buckets, rejecting a second
/// version block. No grammar production builds a `Map` yet, so that bucket
/// stays empty; it exists because the member model reserves the kind.
fn aggregate_members(container: &str, members: Vec<Member>) -> Result<ContainerMembers, ParseError> {
    let mut res = ContainerMembers::default();

    for member in members {
        match member {
            Member::Version(v) => {
                if res.version.is_some() {
                    return Err(structural(container, "duplicate version block"));
                }
                res.version = Some(v);
            }
            Member::Attribute(a) => res.attributes.push(a),
            Member::Method(m) => res.methods.push(m),
            Member::Broadcast(b) => res.broadcasts.push(b),
            Member::Typedef(t) => res.typedefs.push(t),
            Member::Enumeration(e) => res.enumerations.push(e),
            Member::Struct(s) => res.structs.push(s),
            Member::Array(a) => res.arrays.push(a),
        }
    }

    Ok(res)
}

/// Sorts the argument groups of a method or broadcast body, rejecting a
/// duplicate group of any kind. An empty group still counts as present.
fn collect_arg_groups(
    owner: &str,
    groups: Vec<ArgGroup>,
) -> Result<
    (
        Option<Vec<Argument>>,
        Option<Vec<Argument>>,
        Option<Vec<Enumerator>>,
    ),
    ParseError,
> {
    let mut in_args = None;
    let mut out_args = None;
    let mut errors = None;

    for group in groups {
        match group {
            ArgGroup::In(args) => {
                if in_args.is_some() {
                    return Err(structural(owner, "duplicate 'in' argument group"));
                }
                in_args = Some(args);
            }
            ArgGroup::Out(args) => {
                if out_args.is_some() {
                    return Err(structural(owner, "duplicate 'out' argument group"));
                }
                out_args = Some(args);
            }
            ArgGroup::Error(codes) => {
                if errors.is_some() {
                    return Err(structural(owner, "duplicate 'error' group"));
                }
                errors = Some(codes);
            }
        }
    }

    Ok((in_args, out_args, errors))
}

pub struct Parser {
    tokens: Vec<WithTokenMetadata<Token>>,
    cursor: usize,
}

impl Parser {
    pub fn new(tokens: Vec<WithTokenMetadata<Token>>) -> Parser {
        Parser { tokens, cursor: 0 }
    }

    pub fn parse(&mut self) -> Result<Vec<Definition>, ParseError> {
        let mut definitions: Vec<Definition> = Vec::new();

        while self.matches_any(&DEFINITION_KEYWORDS) {
            definitions.push(self.parse_definition()?);
        }

        if definitions.is_empty() {
            return Err(err_at(self.peek(), "Expected at least one definition"));
        }

        let next = self.next();
        match next.value {
            Token::Eof => {
                tracing::debug!(definitions = definitions.len(), "parsed compilation unit");
                Ok(definitions)
            }
            _ => Err(err_at(
                next,
                "Expected a package, import, typecollection, or interface definition",
            )),
        }
    }

    fn peek(&self) -> &WithTokenMetadata<Token> {
        match self.tokens.get(self.cursor) {
            Some(t) => t,
            None => &EOF_TOKEN,
        }
    }

    fn next(&mut self) -> &WithTokenMetadata<Token> {
        match self.tokens.get(self.cursor) {
            Some(t) => {
                self.cursor += 1;

                t
            }
            None => &EOF_TOKEN,
        }
    }

    fn check(&self, t: TokenKind) -> bool {
        TokenKind::from(self.peek()) == t
    }

    fn matches_any(&self, ts: &[TokenKind]) -> bool {
        for t in ts {
            if self.check(*t) {
                return true;
            }
        }

        false
    }

    fn consume(
        &mut self,
        t: TokenKind,
        message: &str,
    ) -> Result<&WithTokenMetadata<Token>, ParseError> {
        if self.check(t) {
            Ok(self.next())
        } else {
            Err(err_at(self.peek(), message))
        }
    }

    fn parse_identifier(&mut self, message: &str) -> Result<String, ParseError> {
        let t = self.next();
        match &t.value {
            Token::Identifier(v) => Ok(v.to_owned()),
            _ => Err(err_at(t, message)),
        }
    }

    fn parse_integer(&mut self, message: &str) -> Result<u64, ParseError> {
        let t = self.next();
        match &t.value {
            Token::Integer(v) => Ok(*v),
            _ => Err(err_at(t, message)),
        }
    }

    fn parse_definition(&mut self) -> Result<Definition, ParseError> {
        match TokenKind::from(self.peek()) {
            TokenKind::Package => self.parse_package(),
            TokenKind::Import => self.parse_import(),
            TokenKind::TypeCollection => self.parse_type_collection(),
            TokenKind::Interface => self.parse_interface(),
            _ => Err(err_at(self.peek(), "Expected a definition")),
        }
    }

    fn parse_package(&mut self) -> Result<Definition, ParseError> {
        self.next();

        Ok(Definition::Package(Package {
            namespace: self.parse_namespace()?,
        }))
    }

    fn parse_import(&mut self) -> Result<Definition, ParseError> {
        self.next();

        let namespace = self.parse_namespace()?;
        self.consume(TokenKind::From, "Expected 'from' after import namespace")?;

        let t = self.next();
        let file_name = match &t.value {
            Token::FileName(v) => v.to_owned(),
            _ => return Err(err_at(t, "Expected a file name literal")),
        };

        Ok(Definition::Import(Import {
            namespace,
            file_name,
        }))
    }

    fn parse_namespace(&mut self) -> Result<String, ParseError> {
        if self.check(TokenKind::Star) {
            self.next();
            return Ok("*".to_owned());
        }

        let mut namespace = self.parse_identifier("Expected a namespace identifier")?;

        while self.check(TokenKind::Dot) {
            self.next();

            // '*' terminates the path; nothing may follow it.
            if self.check(TokenKind::Star) {
                self.next();
                namespace.push_str(".*");
                break;
            }

            namespace.push('.');
            namespace.push_str(&self.parse_identifier("Expected an identifier after '.'")?);
        }

        Ok(namespace)
    }

    fn parse_type_collection(&mut self) -> Result<Definition, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected a type collection name")?;
        self.consume(
            TokenKind::LeftBrace,
            "Expected '{' before type collection members",
        )?;
        let members = self.parse_members()?;
        self.consume(
            TokenKind::RightBrace,
            "Expected '}' after type collection members",
        )?;

        let res = aggregate_members(&name, members)?;
        if !res.attributes.is_empty() {
            return Err(structural(
                &name,
                "attributes are not allowed in a type collection",
            ));
        }
        if !res.methods.is_empty() {
            return Err(structural(
                &name,
                "methods are not allowed in a type collection",
            ));
        }
        if !res.broadcasts.is_empty() {
            return Err(structural(
                &name,
                "broadcasts are not allowed in a type collection",
            ));
        }

        Ok(Definition::TypeCollection(TypeCollection {
            name,
            version: res.version,
            typedefs: res.typedefs,
            enumerations: res.enumerations,
            structs: res.structs,
            arrays: res.arrays,
            maps: res.maps,
        }))
    }

    fn parse_interface(&mut self) -> Result<Definition, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected an interface name")?;
        let extends = self.parse_extends()?;
        self.consume(TokenKind::LeftBrace, "Expected '{' before interface members")?;
        let members = self.parse_members()?;
        self.consume(TokenKind::RightBrace, "Expected '}' after interface members")?;

        let res = aggregate_members(&name, members)?;

        Ok(Definition::Interface(Interface {
            name,
            extends,
            version: res.version,
            attributes: res.attributes,
            methods: res.methods,
            broadcasts: res.broadcasts,
            typedefs: res.typedefs,
            enumerations: res.enumerations,
            structs: res.structs,
            arrays: res.arrays,
            maps: res.maps,
        }))
    }

    fn parse_extends(&mut self) -> Result<Option<String>, ParseError> {
        if !self.check(TokenKind::Extends) {
            return Ok(None);
        }
        self.next();

        Ok(Some(
            self.parse_identifier("Expected a base name after 'extends'")?,
        ))
    }

    /// Both container kinds accept the full member set here; what a type
    /// collection may not hold is rejected during aggregation so that the
    /// caller gets a structural error instead of a token-level one.
    fn parse_members(&mut self) -> Result<Vec<Member>, ParseError> {
        let mut members: Vec<Member> = Vec::new();

        while !self.check(TokenKind::RightBrace) {
            members.push(self.parse_member()?);
        }

        Ok(members)
    }

    fn parse_member(&mut self) -> Result<Member, ParseError> {
        match TokenKind::from(self.peek()) {
            TokenKind::Version => Ok(Member::Version(self.parse_version()?)),
            TokenKind::Attribute => Ok(Member::Attribute(self.parse_attribute()?)),
            TokenKind::Method => Ok(Member::Method(self.parse_method()?)),
            TokenKind::Broadcast => Ok(Member::Broadcast(self.parse_broadcast()?)),
            TokenKind::Typedef => Ok(Member::Typedef(self.parse_typedef()?)),
            TokenKind::Enumeration => Ok(Member::Enumeration(self.parse_enumeration()?)),
            TokenKind::Struct => Ok(Member::Struct(self.parse_struct()?)),
            TokenKind::Array => Ok(Member::Array(self.parse_array()?)),
            _ => Err(err_at(self.peek(), "Expected a container member")),
        }
    }

    fn parse_version(&mut self) -> Result<Version, ParseError> {
        self.next();

        self.consume(TokenKind::LeftBrace, "Expected '{' after 'version'")?;
        self.consume(TokenKind::Major, "Expected 'major'")?;
        let major = self.parse_integer("Expected a major version number")?;
        self.consume(TokenKind::Minor, "Expected 'minor'")?;
        let minor = self.parse_integer("Expected a minor version number")?;
        self.consume(TokenKind::RightBrace, "Expected '}' after version")?;

        Ok(Version { major, minor })
    }

    fn parse_typedef(&mut self) -> Result<Typedef, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected a typedef name")?;
        self.consume(TokenKind::Is, "Expected 'is' after typedef name")?;
        let ty = self.parse_type()?;

        Ok(Typedef { name, ty })
    }

    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        self.next();

        let ty = self.parse_type()?;
        let name = self.parse_identifier("Expected an attribute name")?;

        // Attribute flags have no production yet.
        Ok(Attribute {
            name,
            ty,
            flags: vec![],
        })
    }

    /// `type_ref := primitive | primitive '[' ']' | identifier`. A bare
    /// identifier is a forward reference to a type declared elsewhere; only
    /// primitives take the `[]` suffix.
    fn parse_type(&mut self) -> Result<Type, ParseError> {
        let t = self.next();
        let line = t.pos.line;
        let token = t.value.clone();

        if let Token::Identifier(v) = &token {
            return Ok(Type::Custom(v.to_owned()));
        }

        let primitive: PrimitiveType = (&token).try_into().map_err(|_| ParseError::Syntax {
            message: "Expected a valid type".to_owned(),
            lexeme: token.to_string(),
            line,
        })?;

        if self.check(TokenKind::LeftBracket) {
            self.next();
            self.consume(TokenKind::RightBracket, "Expected ']' after '['")?;

            return Ok(Type::Array(Box::new(Array {
                name: None,
                element_type: Type::Primitive(primitive),
            })));
        }

        Ok(Type::Primitive(primitive))
    }

    fn parse_method(&mut self) -> Result<Method, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected a method name")?;
        let flags = self.parse_flags()?;
        self.consume(TokenKind::LeftBrace, "Expected '{' before method body")?;
        let groups = self.parse_arg_groups()?;
        self.consume(TokenKind::RightBrace, "Expected '}' after method body")?;

        let (in_args, out_args, errors) = collect_arg_groups(&name, groups)?;

        Ok(Method {
            name,
            flags,
            in_args,
            out_args,
            errors,
        })
    }

    fn parse_broadcast(&mut self) -> Result<Broadcast, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected a broadcast name")?;
        let flags = self.parse_flags()?;
        self.consume(TokenKind::LeftBrace, "Expected '{' before broadcast body")?;
        let groups = self.parse_arg_groups()?;
        self.consume(TokenKind::RightBrace, "Expected '}' after broadcast body")?;

        let (in_args, out_args, errors) = collect_arg_groups(&name, groups)?;
        if in_args.is_some() {
            return Err(structural(
                &name,
                "'in' arguments are not allowed in a broadcast",
            ));
        }
        if errors.is_some() {
            return Err(structural(
                &name,
                "an 'error' group is not allowed in a broadcast",
            ));
        }

        Ok(Broadcast {
            name,
            flags,
            out_args,
        })
    }

    fn parse_flags(&mut self) -> Result<Vec<Flag>, ParseError> {
        let mut flags: Vec<Flag> = Vec::new();

        while self.matches_any(&FLAG_KEYWORDS) {
            let t = self.next();
            let flag: Flag = (&t.value)
                .try_into()
                .map_err(|message: String| err_at(t, &message))?;
            flags.push(flag);
        }

        Ok(flags)
    }

    fn parse_arg_groups(&mut self) -> Result<Vec<ArgGroup>, ParseError> {
        let mut groups: Vec<ArgGroup> = Vec::new();

        while !self.check(TokenKind::RightBrace) {
            groups.push(self.parse_arg_group()?);
        }

        Ok(groups)
    }

    fn parse_arg_group(&mut self) -> Result<ArgGroup, ParseError> {
        match TokenKind::from(self.peek()) {
            TokenKind::In => {
                self.next();
                self.consume(TokenKind::LeftBrace, "Expected '{' after 'in'")?;
                let args = self.parse_arguments()?;
                self.consume(TokenKind::RightBrace, "Expected '}' after 'in' arguments")?;

                Ok(ArgGroup::In(args))
            }
            TokenKind::Out => {
                self.next();
                self.consume(TokenKind::LeftBrace, "Expected '{' after 'out'")?;
                let args = self.parse_arguments()?;
                self.consume(TokenKind::RightBrace, "Expected '}' after 'out' arguments")?;

                Ok(ArgGroup::Out(args))
            }
            TokenKind::Error => {
                self.next();
                self.consume(TokenKind::LeftBrace, "Expected '{' after 'error'")?;
                let codes = self.parse_enumerators()?;
                self.consume(TokenKind::RightBrace, "Expected '}' after error codes")?;

                Ok(ArgGroup::Error(codes))
            }
            _ => Err(err_at(
                self.peek(),
                "Expected an 'in', 'out', or 'error' group",
            )),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Argument>, ParseError> {
        let mut arguments: Vec<Argument> = Vec::new();

        while !self.check(TokenKind::RightBrace) {
            let ty = self.parse_type()?;
            let name = self.parse_identifier("Expected an argument name")?;
            arguments.push(Argument { name, ty });
        }

        Ok(arguments)
    }

    fn parse_enumeration(&mut self) -> Result<Enumeration, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected an enumeration name")?;
        let extends = self.parse_extends()?;
        self.consume(TokenKind::LeftBrace, "Expected '{' before enumerators")?;
        let enumerators = self.parse_enumerators()?;
        self.consume(TokenKind::RightBrace, "Expected '}' after enumerators")?;

        Ok(Enumeration {
            name,
            enumerators,
            extends,
        })
    }

    fn parse_enumerators(&mut self) -> Result<Vec<Enumerator>, ParseError> {
        let mut enumerators: Vec<Enumerator> = Vec::new();

        while !self.check(TokenKind::RightBrace) {
            let name = self.parse_identifier("Expected an enumerator name")?;

            let value = if self.check(TokenKind::Equal) {
                self.next();
                Some(self.parse_integer("Expected an enumerator value")?)
            } else {
                None
            };

            enumerators.push(Enumerator { name, value });
        }

        Ok(enumerators)
    }

    fn parse_struct(&mut self) -> Result<Struct, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected a struct name")?;
        let extends = self.parse_extends()?;
        self.consume(TokenKind::LeftBrace, "Expected '{' before struct fields")?;

        let mut fields: Vec<StructField> = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            let ty = self.parse_type()?;
            let field_name = self.parse_identifier("Expected a field name")?;
            fields.push(StructField {
                name: field_name,
                ty,
            });
        }

        self.consume(TokenKind::RightBrace, "Expected '}' after struct fields")?;

        Ok(Struct {
            name,
            fields,
            extends,
        })
    }

    fn parse_array(&mut self) -> Result<Array, ParseError> {
        self.next();

        let name = self.parse_identifier("Expected an array name")?;
        self.consume(TokenKind::Of, "Expected 'of' after array name")?;
        let element_type = self.parse_type()?;

        Ok(Array {
            name: Some(name),
            element_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;

    use crate::{
        ast::{
            Argument, Attribute, Broadcast, Definition, Enumeration, Enumerator, Flag, Import,
            Interface, Method, Package, Struct, StructField, Typedef, TypeCollection, Version,
        },
        error::ParseError,
        lexer::Lexer,
        types::{Array, PrimitiveType, Type},
    };

    use super::Parser;

    fn parse(buf: &str) -> Result<Vec<Definition>, ParseError> {
        Parser::new(
            Lexer::new(buf)
                .tokenize()
                .expect("expected a valid token stream"),
        )
        .parse()
    }

    const ROUND_TRIP: &str = "
        package P

        interface I {
            version { major 1 minor 0 }
            attribute UInt8 x
            method M {
                in { UInt8 a }
                out { Int8 b }
            }
        }
    ";

    lazy_static! {
        static ref ROUND_TRIP_AST: Vec<Definition> = vec![
            Definition::Package(Package {
                namespace: "P".to_owned()
            }),
            Definition::Interface(Interface {
                name: "I".to_owned(),
                extends: None,
                version: Some(Version { major: 1, minor: 0 }),
                attributes: vec![Attribute {
                    name: "x".to_owned(),
                    ty: Type::Primitive(PrimitiveType::UInt8),
                    flags: vec![],
                }],
                methods: vec![Method {
                    name: "M".to_owned(),
                    flags: vec![],
                    in_args: Some(vec![Argument {
                        name: "a".to_owned(),
                        ty: Type::Primitive(PrimitiveType::UInt8),
                    }]),
                    out_args: Some(vec![Argument {
                        name: "b".to_owned(),
                        ty: Type::Primitive(PrimitiveType::Int8),
                    }]),
                    errors: None,
                }],
                broadcasts: vec![],
                typedefs: vec![],
                enumerations: vec![],
                structs: vec![],
                arrays: vec![],
                maps: vec![],
            }),
        ];
    }

    #[test]
    fn test_round_trip_shape() {
        let definitions = parse(ROUND_TRIP).expect("expected a valid compilation unit");
        assert_eq!(definitions, *ROUND_TRIP_AST);
    }

    #[test]
    fn test_idempotence() {
        assert_eq!(parse(ROUND_TRIP), parse(ROUND_TRIP));
    }

    #[test]
    fn test_parse_package_namespaces() {
        assert_eq!(
            parse("package org.franca.examples").unwrap(),
            vec![Definition::Package(Package {
                namespace: "org.franca.examples".to_owned()
            })]
        );
        assert_eq!(
            parse("package *").unwrap(),
            vec![Definition::Package(Package {
                namespace: "*".to_owned()
            })]
        );
        assert_eq!(
            parse("package org.franca.*").unwrap(),
            vec![Definition::Package(Package {
                namespace: "org.franca.*".to_owned()
            })]
        );
    }

    #[test]
    fn test_parse_import() {
        assert_eq!(
            parse("import org.example.* from \"example.fidl\"").unwrap(),
            vec![Definition::Import(Import {
                namespace: "org.example.*".to_owned(),
                file_name: "example.fidl".to_owned(),
            })]
        );
    }

    #[test]
    fn test_parse_import_err_missing_file_name() {
        let err = parse("import org.example.* from example").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "Expected a file name literal".to_owned(),
                lexeme: "example".to_owned(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_parse_err_empty_input() {
        let err = parse("").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "Expected at least one definition".to_owned(),
                lexeme: "EOF".to_owned(),
                line: 0,
            }
        );
    }

    #[test]
    fn test_parse_err_trailing_garbage() {
        let err = parse("package P }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "Expected a package, import, typecollection, or interface definition"
                    .to_owned(),
                lexeme: "}".to_owned(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_version_rejected() {
        let err = parse(
            "interface I {
                version { major 1 minor 0 }
                version { major 2 minor 0 }
            }",
        )
        .unwrap_err();

        assert_eq!(
            err,
            ParseError::Structural {
                container: "I".to_owned(),
                message: "duplicate version block".to_owned(),
            }
        );
    }

    #[test]
    fn test_duplicate_version_rejected_in_type_collection() {
        let err = parse(
            "typecollection T {
                version { major 1 minor 0 }
                version { major 1 minor 1 }
            }",
        )
        .unwrap_err();

        assert_eq!(
            err,
            ParseError::Structural {
                container: "T".to_owned(),
                message: "duplicate version block".to_owned(),
            }
        );
    }

    #[test]
    fn test_type_collection_rejects_attribute() {
        let err = parse("typecollection T { attribute UInt8 x }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "T".to_owned(),
                message: "attributes are not allowed in a type collection".to_owned(),
            }
        );
    }

    #[test]
    fn test_type_collection_rejects_method() {
        let err = parse("typecollection T { method M { } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "T".to_owned(),
                message: "methods are not allowed in a type collection".to_owned(),
            }
        );
    }

    #[test]
    fn test_type_collection_rejects_broadcast() {
        let err = parse("typecollection T { broadcast B { } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "T".to_owned(),
                message: "broadcasts are not allowed in a type collection".to_owned(),
            }
        );
    }

    #[test]
    fn test_type_collection_members() {
        let definitions = parse(
            "typecollection T {
                version { major 3 minor 7 }
                typedef Id is UInt32
                enumeration E { A B }
                struct S { UInt8 f }
                array Ids of UInt32
            }",
        )
        .expect("expected a valid type collection");

        assert_eq!(
            definitions,
            vec![Definition::TypeCollection(TypeCollection {
                name: "T".to_owned(),
                version: Some(Version { major: 3, minor: 7 }),
                typedefs: vec![Typedef {
                    name: "Id".to_owned(),
                    ty: Type::Primitive(PrimitiveType::UInt32),
                }],
                enumerations: vec![Enumeration {
                    name: "E".to_owned(),
                    enumerators: vec![
                        Enumerator {
                            name: "A".to_owned(),
                            value: None
                        },
                        Enumerator {
                            name: "B".to_owned(),
                            value: None
                        },
                    ],
                    extends: None,
                }],
                structs: vec![Struct {
                    name: "S".to_owned(),
                    fields: vec![StructField {
                        name: "f".to_owned(),
                        ty: Type::Primitive(PrimitiveType::UInt8),
                    }],
                    extends: None,
                }],
                arrays: vec![Array {
                    name: Some("Ids".to_owned()),
                    element_type: Type::Primitive(PrimitiveType::UInt32),
                }],
                maps: vec![],
            })]
        );
    }

    #[test]
    fn test_broadcast_rejects_in_group() {
        let err = parse("interface I { broadcast B { in { UInt8 a } } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "B".to_owned(),
                message: "'in' arguments are not allowed in a broadcast".to_owned(),
            }
        );
    }

    #[test]
    fn test_broadcast_rejects_error_group() {
        let err = parse("interface I { broadcast B { error { E1 } } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "B".to_owned(),
                message: "an 'error' group is not allowed in a broadcast".to_owned(),
            }
        );
    }

    #[test]
    fn test_broadcast_out_group_ok() {
        let definitions =
            parse("interface I { broadcast B { out { UInt8 a } } }").expect("expected a broadcast");

        match &definitions[0] {
            Definition::Interface(interface) => {
                assert_eq!(
                    interface.broadcasts,
                    vec![Broadcast {
                        name: "B".to_owned(),
                        flags: vec![],
                        out_args: Some(vec![Argument {
                            name: "a".to_owned(),
                            ty: Type::Primitive(PrimitiveType::UInt8),
                        }]),
                    }]
                );
            }
            d => panic!("expected an interface, got {:?}", d),
        }
    }

    #[test]
    fn test_method_duplicate_in_group_rejected() {
        let err = parse("interface I { method M { in { } in { UInt8 a } } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "M".to_owned(),
                message: "duplicate 'in' argument group".to_owned(),
            }
        );
    }

    #[test]
    fn test_method_duplicate_out_group_rejected() {
        let err = parse("interface I { method M { out { } out { } } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "M".to_owned(),
                message: "duplicate 'out' argument group".to_owned(),
            }
        );
    }

    #[test]
    fn test_method_duplicate_error_group_rejected() {
        let err = parse("interface I { method M { error { E1 } error { E2 } } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                container: "M".to_owned(),
                message: "duplicate 'error' group".to_owned(),
            }
        );
    }

    #[test]
    fn test_method_empty_body() {
        let definitions = parse("interface I { method M { } }").expect("expected a method");

        match &definitions[0] {
            Definition::Interface(interface) => {
                assert_eq!(
                    interface.methods,
                    vec![Method {
                        name: "M".to_owned(),
                        flags: vec![],
                        in_args: None,
                        out_args: None,
                        errors: None,
                    }]
                );
            }
            d => panic!("expected an interface, got {:?}", d),
        }
    }

    #[test]
    fn test_method_flags_and_errors() {
        let definitions = parse(
            "interface I {
                method M selective fireAndForget {
                    error { FAILED = 1 BUSY }
                }
            }",
        )
        .expect("expected a method");

        match &definitions[0] {
            Definition::Interface(interface) => {
                assert_eq!(
                    interface.methods,
                    vec![Method {
                        name: "M".to_owned(),
                        flags: vec![Flag::Selective, Flag::FireAndForget],
                        in_args: None,
                        out_args: None,
                        errors: Some(vec![
                            Enumerator {
                                name: "FAILED".to_owned(),
                                value: Some(1)
                            },
                            Enumerator {
                                name: "BUSY".to_owned(),
                                value: None
                            },
                        ]),
                    }]
                );
            }
            d => panic!("expected an interface, got {:?}", d),
        }
    }

    #[test]
    fn test_enumerator_defaults_preserved_in_order() {
        let definitions =
            parse("typecollection T { enumeration Color { RED GREEN = 5 BLUE } }")
                .expect("expected an enumeration");

        match &definitions[0] {
            Definition::TypeCollection(tc) => {
                assert_eq!(
                    tc.enumerations,
                    vec![Enumeration {
                        name: "Color".to_owned(),
                        enumerators: vec![
                            Enumerator {
                                name: "RED".to_owned(),
                                value: None
                            },
                            Enumerator {
                                name: "GREEN".to_owned(),
                                value: Some(5)
                            },
                            Enumerator {
                                name: "BLUE".to_owned(),
                                value: None
                            },
                        ],
                        extends: None,
                    }]
                );
            }
            d => panic!("expected a type collection, got {:?}", d),
        }
    }

    #[test]
    fn test_enumeration_extends_preserved_verbatim() {
        let definitions =
            parse("typecollection T { enumeration More extends Base { EXTRA } }")
                .expect("expected an enumeration");

        match &definitions[0] {
            Definition::TypeCollection(tc) => {
                assert_eq!(tc.enumerations[0].extends, Some("Base".to_owned()));
            }
            d => panic!("expected a type collection, got {:?}", d),
        }
    }

    #[test]
    fn test_array_forms_distinguished() {
        let definitions = parse(
            "typecollection T {
                typedef Ids is UInt32[]
                array Ids2 of UInt32
            }",
        )
        .expect("expected a type collection");

        match &definitions[0] {
            Definition::TypeCollection(tc) => {
                assert_eq!(
                    tc.typedefs,
                    vec![Typedef {
                        name: "Ids".to_owned(),
                        ty: Type::Array(Box::new(Array {
                            name: None,
                            element_type: Type::Primitive(PrimitiveType::UInt32),
                        })),
                    }]
                );
                assert_eq!(
                    tc.arrays,
                    vec![Array {
                        name: Some("Ids2".to_owned()),
                        element_type: Type::Primitive(PrimitiveType::UInt32),
                    }]
                );
            }
            d => panic!("expected a type collection, got {:?}", d),
        }
    }

    #[test]
    fn test_array_suffix_on_custom_type_rejected() {
        // Only primitive types take the '[]' suffix.
        assert!(parse("typecollection T { typedef X is Custom[] }").is_err());
    }

    #[test]
    fn test_struct_extends_preserved_verbatim() {
        let definitions =
            parse("typecollection T { struct Derived extends Base { UInt8 f } }")
                .expect("expected a struct");

        match &definitions[0] {
            Definition::TypeCollection(tc) => {
                assert_eq!(
                    tc.structs,
                    vec![Struct {
                        name: "Derived".to_owned(),
                        fields: vec![StructField {
                            name: "f".to_owned(),
                            ty: Type::Primitive(PrimitiveType::UInt8),
                        }],
                        extends: Some("Base".to_owned()),
                    }]
                );
            }
            d => panic!("expected a type collection, got {:?}", d),
        }
    }

    #[test]
    fn test_custom_type_references_unresolved() {
        let definitions = parse(
            "interface I {
                attribute Station current
                method M {
                    in { Station s }
                }
                struct S { Station home }
                typedef Alias is Station
            }",
        )
        .expect("expected an interface");

        match &definitions[0] {
            Definition::Interface(interface) => {
                assert_eq!(
                    interface.attributes[0].ty,
                    Type::Custom("Station".to_owned())
                );
                assert_eq!(
                    interface.methods[0].in_args,
                    Some(vec![Argument {
                        name: "s".to_owned(),
                        ty: Type::Custom("Station".to_owned()),
                    }])
                );
                assert_eq!(
                    interface.structs[0].fields[0].ty,
                    Type::Custom("Station".to_owned())
                );
                assert_eq!(
                    interface.typedefs[0].ty,
                    Type::Custom("Station".to_owned())
                );
            }
            d => panic!("expected an interface, got {:?}", d),
        }
    }

    #[test]
    fn test_interface_extends() {
        let definitions =
            parse("interface Derived extends Base { }").expect("expected an interface");

        match &definitions[0] {
            Definition::Interface(interface) => {
                assert_eq!(interface.name, "Derived");
                assert_eq!(interface.extends, Some("Base".to_owned()));
            }
            d => panic!("expected an interface, got {:?}", d),
        }
    }

    #[test]
    fn test_definition_order_preserved() {
        let definitions = parse(
            "package P
             typecollection T { }
             interface I { }
             import other.* from \"other.fidl\"",
        )
        .expect("expected a valid compilation unit");

        assert_eq!(definitions.len(), 4);
        assert!(matches!(definitions[0], Definition::Package(_)));
        assert!(matches!(definitions[1], Definition::TypeCollection(_)));
        assert!(matches!(definitions[2], Definition::Interface(_)));
        assert!(matches!(definitions[3], Definition::Import(_)));
    }

    #[test]
    fn test_syntax_error_reports_lexeme_and_line() {
        let err = parse("interface I {\n    bogus\n}").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "Expected a container member".to_owned(),
                lexeme: "bogus".to_owned(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_syntax_error_unterminated_interface() {
        let err = parse("interface I {").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "Expected a container member".to_owned(),
                lexeme: "EOF".to_owned(),
                line: 0,
            }
        );
    }

    #[test]
    fn test_arg_group_err_unknown_group() {
        let err = parse("interface I { method M { inout { } } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "Expected an 'in', 'out', or 'error' group".to_owned(),
                lexeme: "inout".to_owned(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_version_err_missing_minor() {
        let err = parse("interface I { version { major 1 } }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "Expected 'minor'".to_owned(),
                lexeme: "}".to_owned(),
                line: 1,
            }
        );
    }
}
