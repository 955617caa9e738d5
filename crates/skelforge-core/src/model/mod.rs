pub mod entity;
pub mod function;
pub mod member;
pub mod resolved;

pub use entity::{EntityDescription, EntityKind, ParentRef};
pub use function::{FunctionDescription, ReturnSpec};
pub use member::MemberDescription;
pub use resolved::{ResolvedEntity, ResolvedFunction, ResolvedMember};
