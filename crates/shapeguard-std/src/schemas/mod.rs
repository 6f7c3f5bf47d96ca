//! Schema catalog.

mod array;
mod composite;
mod object;
mod primitive;
mod record;
mod tuple;
mod union;
mod wrappers;

pub use array::{ArraySchema, ArraySchemaAsync, array, array_async};
pub use object::{
    ObjectSchema, ObjectSchemaAsync, UnknownKeys, loose_object, loose_object_async, object,
    object_async, strict_object, strict_object_async,
};
pub use primitive::{
    LiteralSchema, Primitive, PrimitiveSchema, UnknownSchema, boolean, literal, null, number,
    string, unknown,
};
pub use record::{RecordSchema, RecordSchemaAsync, record, record_async};
pub use tuple::{TupleSchema, TupleSchemaAsync, tuple, tuple_async};
pub use union::{UnionSchema, UnionSchemaAsync, union, union_async};
pub use wrappers::{
    FallbackSchema, FallbackSchemaAsync, NullableSchema, NullableSchemaAsync, NullishSchema,
    NullishSchemaAsync, OptionalSchema, OptionalSchemaAsync, fallback, fallback_async,
    fallback_with, nullable, nullable_async, nullish, nullish_async, optional, optional_async,
    optional_with_default,
};
