mod arena;
mod handle;
mod node;
mod raw_bst;
mod tree_id;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use node::{Node, predecessor, successor};
pub(crate) use raw_bst::RawBst;
pub(crate) use tree_id::TreeId;
