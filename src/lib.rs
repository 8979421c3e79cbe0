// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Kindred
//!
//! The interactive side of the family tree viewer.  [`TreeController`] loads a tree through a
//! [`TreeApi`], lays it out with the layered layout engine, and applies edits optimistically with
//! undo and redo.  The graph model and the layout live in their own crates, `kindred-graph` and
//! `kindred-layout`.

pub mod api;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod history;
pub mod notice;
pub mod view;
pub mod viewport;

pub use api::{ApiError, HttpTreeApi, NewPerson, NewRelationship, TreeApi};
pub use controller::{
    DeleteRequest, DisplayMode, LoadFailure, Parentage, PersonDraft, RelativeKind, TreeController,
    TreeView, ViewState,
};
pub use credentials::{CredentialProvider, StaticToken};
pub use error::ControllerError;
pub use history::{CommandHistory, HistoryEntry};
pub use notice::{Notice, NoticeLevel};
pub use view::{GraphEdge, GraphNode, GraphView, NodeData, ViewSettings};
pub use viewport::{Bounds, PaneEvent, Viewport};

pub const APP_NAME: &str = "kindred";

/// Crates whose log output is enabled by default.
pub const LOG_CRATES: &[&str] = &[
    env!("CARGO_PKG_NAME"),
    "kindred_app_config",
    "kindred_graph",
    "kindred_keyboard",
    "kindred_layout",
    "kindred_logging",
];

/// A module which is typically glob imported.
pub mod prelude {
    pub use super::{
        ControllerError, DisplayMode, GraphView, HttpTreeApi, Notice, PersonDraft, RelativeKind,
        TreeApi, TreeController, ViewSettings, ViewState,
    };
}

// End of File
