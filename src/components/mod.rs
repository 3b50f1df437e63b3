//! Ratatui widgets over the tree engine's state.

pub mod status_bar;
pub mod tree;
