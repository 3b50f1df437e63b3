//! The tree engine: caller-owned structure in, windowed rows and outbound
//! requests out.

pub mod clipboard;
pub mod dragdrop;
pub mod filter;
pub mod flatten;
pub mod node;
pub mod rename;
pub mod search;
pub mod state;
pub mod window;
