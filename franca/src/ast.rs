use crate::types::{Array, Type};

/// A top-level entry of a compilation unit, in source order.
#[derive(Debug, PartialEq)]
pub enum Definition {
    Package(Package),
    Import(Import),
    TypeCollection(TypeCollection),
    Interface(Interface),
}

#[derive(Debug, PartialEq)]
pub struct Package {
    pub namespace: String,
}

/// Recorded as-is; opening the referenced file is the model loader's job.
#[derive(Debug, PartialEq)]
pub struct Import {
    pub namespace: String,
    pub file_name: String,
}

#[derive(Debug, PartialEq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
}

#[derive(Debug, PartialEq)]
pub struct Typedef {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, PartialEq)]
pub struct Enumerator {
    pub name: String,
    /// `None` when no `= value` was written; value inference for implicit
    /// enumerators happens downstream, never here.
    pub value: Option<u64>,
}

#[derive(Debug, PartialEq)]
pub struct Enumeration {
    pub name: String,
    pub enumerators: Vec<Enumerator>,
    pub extends: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, PartialEq)]
pub struct Struct {
    pub name: String,
    pub fields: Vec<StructField>,
    pub extends: Option<String>,
}

/// Reserved member kind: the model and aggregation know about maps, but no
/// grammar production constructs one yet.
#[derive(Debug, PartialEq)]
pub struct Map {
    pub name: String,
    pub key_type: Type,
    pub value_type: Type,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Flag {
    Selective,
    FireAndForget,
    Polymorphic,
    NoSubscriptions,
    ReadOnly,
}

#[derive(Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub ty: Type,
    /// Always empty for now; the grammar has no attribute-flag production.
    pub flags: Vec<Flag>,
}

#[derive(Debug, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: Type,
}

/// `in_args`/`out_args`/`errors` are `None` when the group was not written
/// at all, `Some(vec![])` when it was written empty.
#[derive(Debug, PartialEq)]
pub struct Method {
    pub name: String,
    pub flags: Vec<Flag>,
    pub in_args: Option<Vec<Argument>>,
    pub out_args: Option<Vec<Argument>>,
    pub errors: Option<Vec<Enumerator>>,
}

#[derive(Debug, PartialEq)]
pub struct Broadcast {
    pub name: String,
    pub flags: Vec<Flag>,
    pub out_args: Option<Vec<Argument>>,
}

#[derive(Debug, PartialEq)]
pub struct Interface {
    pub name: String,
    pub extends: Option<String>,
    pub version: Option<Version>,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
    pub broadcasts: Vec<Broadcast>,
    pub typedefs: Vec<Typedef>,
    pub enumerations: Vec<Enumeration>,
    pub structs: Vec<Struct>,
    pub arrays: Vec<Array>,
    pub maps: Vec<Map>,
}

#[derive(Debug, PartialEq)]
pub struct TypeCollection {
    pub name: String,
    pub version: Option<Version>,
    pub typedefs: Vec<Typedef>,
    pub enumerations: Vec<Enumeration>,
    pub structs: Vec<Struct>,
    pub arrays: Vec<Array>,
    pub maps: Vec<Map>,
}
