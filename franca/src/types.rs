/// A type reference as written in source. `Custom` referents are bare names;
/// resolving them against their defining declarations is a later pass's job.
#[derive(Debug, PartialEq)]
pub enum Type {
    Primitive(PrimitiveType),
    Custom(String),
    Array(Box<Array>),
}

/// The closed catalogue of Franca primitive types. Construction from a
/// keyword token goes through an exhaustive match (see `token.rs`), so adding
/// a variant here fails to compile until every site handles it.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PrimitiveType {
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
}

/// Both array forms: `array Name of T` carries `Some(name)` and lands in the
/// enclosing container's `arrays` bucket; the `T[]` suffix form is anonymous
/// (`name: None`) and lives wherever the type reference appeared.
#[derive(Debug, PartialEq)]
pub struct Array {
    pub name: Option<String>,
    pub element_type: Type,
}
