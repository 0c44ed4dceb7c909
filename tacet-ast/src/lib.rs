mod node;
mod simplify;

pub use node::{begin, end, Node, Token};
pub use simplify::{prune, skip, squash};
