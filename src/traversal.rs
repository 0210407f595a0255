/// The order in which a depth-first traversal visits the keys of a tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Node, then its left subtree, then its right subtree.
    Pre,
    /// Left subtree, then the node, then the right subtree. Yields keys in ascending order.
    In,
    /// Left subtree, then the right subtree, then the node.
    Post,
}
