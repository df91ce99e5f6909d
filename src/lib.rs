pub mod assembler;
pub mod batch;
pub mod builder;
pub mod element;
pub mod error;
mod nesting;
pub mod ring;


pub use assembler::merge_rings;
pub use builder::{ContainsRelationBuilder, RelationBuilder, UnionRelationBuilder};
pub use element::{Fragment, Member, MemberKind, Relation, Role, Tags};
pub use error::{BuildError, Result};
pub use ring::Ring;
