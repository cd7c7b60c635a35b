pub mod edge;
pub mod node;
pub mod relation;
pub mod triple;

pub use edge::{Edge, Provenance};
pub use node::Node;
pub use relation::RelationKind;
pub use triple::CausalTriple;
