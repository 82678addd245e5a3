pub mod random;
pub mod search_tree;
