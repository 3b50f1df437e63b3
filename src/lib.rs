//! An embeddable file-tree widget engine for Ratatui.
//!
//! The engine renders an arbitrarily deep nested structure as a flat,
//! windowed list: the caller owns the structure and passes it in wholesale;
//! the engine owns collapse/selection/clipboard/drag/rename state, derives
//! the visible rows, and queues [`TreeRequest`]s the caller applies and
//! answers with an updated structure.
//!
//! ```
//! use ftree::{FileTreeState, Node, TreeOptions, TreeRequest};
//!
//! let root: Node = serde_json::from_str(
//!     r#"{"src": {"main.rs": null}, "README.md": null}"#,
//! ).unwrap();
//! let mut tree = FileTreeState::new(root, TreeOptions::default());
//! tree.toggle_collapse("src");
//! assert_eq!(tree.rows().len(), 2);
//! for request in tree.drain_requests() {
//!     if let TreeRequest::Toggled { path, collapsed } = request {
//!         assert_eq!((path.as_str(), collapsed), ("src", true));
//!     }
//! }
//! ```

pub mod components;
pub mod config;
pub mod error;
pub mod theme;
pub mod tree;

pub use components::status_bar::StatusBarWidget;
pub use components::tree::FileTreeWidget;
pub use error::{AppError, Result};
pub use tree::filter::SearchOptions;
pub use tree::flatten::FlatRow;
pub use tree::node::{Node, NodeKind, NodeSummary};
pub use tree::state::{FileTreeState, TreeOptions, TreeRequest};
pub use tree::window::Viewport;
