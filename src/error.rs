// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use graph::{PersonId, TreeRole};

use crate::api::ApiError;

/// Errors from the tree controller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("the tree has not been loaded")]
    NotReady,

    /// Mutations need the owner or editor role.
    #[error("a tree {0} may not change this tree")]
    ReadOnly(TreeRole),

    #[error("person {0} is not in this tree")]
    UnknownPerson(PersonId),

    #[error("no person is selected")]
    NothingSelected,

    #[error("there is nothing to undo")]
    NothingToUndo,

    #[error("there is nothing to redo")]
    NothingToRedo,

    #[error("undoing a deletion is not supported yet")]
    UndoUnsupported,
}

// End of File
