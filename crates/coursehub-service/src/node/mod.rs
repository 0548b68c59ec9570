//! Teaching hierarchy: nodes, UEs, and tree materialization.

pub mod service;
pub mod tree;
pub mod ue;

pub use service::NodeService;
pub use tree::{NodeMap, UeMap};
pub use ue::UeService;
