//! Teaching hierarchy entities.

pub mod model;
pub mod tree;
pub mod ue;

pub use model::{CreateNode, Node};
pub use tree::{NodeTree, NodeWithChildIds};
pub use ue::{CreateUe, Ue};
