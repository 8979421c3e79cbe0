// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! The interactive tree view: loading, editing with undo/redo, keyboard navigation, focus mode,
//! direction toggling, and pointer interaction.
//!
//! Every mutation follows the same shape: check the role, apply an optimistic change to the
//! displayed view, call the service, then either record history and resynchronize from the
//! server, or roll the view back and raise an error notice.  The graph model itself is only ever
//! replaced by a fresh fetch.

use std::fmt;

use chrono::NaiveDate;
use glam::DVec2;
use graph::{
    FamilyGraph, Gender, Person, PersonId, Relationship, RelationshipType, TreeData, TreeId,
    TreeRole,
};
use keyboard::{Key, KeyEvent};
use layout::Direction;

use crate::api::{ApiError, NewPerson, NewRelationship, TreeApi};
use crate::error::ControllerError;
use crate::history::{CommandHistory, HistoryEntry};
use crate::notice::Notice;
use crate::view::{GraphEdge, GraphNode, GraphView, PendingPlacement, ViewSettings};
use crate::viewport::{PaneEvent, Viewport};

/// Receives pan and drag signals.
pub type PaneListener = Box<dyn FnMut(&PaneEvent) + Send>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The service answered 403.
    PermissionDenied,
    Failed(String),
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::PermissionDenied => f.write_str("you do not have access to this tree"),
            LoadFailure::Failed(message) => write!(f, "the tree could not be loaded: {}", message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Normal,
    /// Only the lineage of `person_id` is shown.
    Focus { person_id: PersonId },
}

/// A loaded tree.
#[derive(Debug, Clone)]
pub struct TreeView {
    pub name: String,
    pub role: TreeRole,
    pub graph: FamilyGraph,
    /// Every person, laid out.
    pub full: GraphView,
    /// What is on screen: `full`, or the focus subgraph, plus any optimistic changes.
    pub displayed: GraphView,
    pub mode: DisplayMode,
}

#[derive(Debug, Clone)]
pub enum ViewState {
    Loading,
    Ready(TreeView),
    Failed(LoadFailure),
}

impl ViewState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }
}

/// Which parent/child relationship a new parent or child gets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parentage {
    #[default]
    Biological,
    Adoptive,
    Step,
}

impl Parentage {
    pub fn relationship_type(self) -> RelationshipType {
        match self {
            Parentage::Biological => RelationshipType::ParentChild,
            Parentage::Adoptive => RelationshipType::AdoptiveParentChild,
            Parentage::Step => RelationshipType::StepParentChild,
        }
    }
}

/// How a new person relates to the person they are added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeKind {
    Parent(Parentage),
    Child(Parentage),
    Spouse,
}

impl RelativeKind {
    pub fn relationship_type(self) -> RelationshipType {
        match self {
            RelativeKind::Parent(parentage) | RelativeKind::Child(parentage) => {
                parentage.relationship_type()
            }
            RelativeKind::Spouse => RelationshipType::Spouse,
        }
    }

    /// `(person_1_id, person_2_id)` of the new relationship.
    fn endpoints<'a>(self, anchor: &'a str, new_person: &'a str) -> (&'a str, &'a str) {
        match self {
            RelativeKind::Parent(_) => (new_person, anchor),
            RelativeKind::Child(_) | RelativeKind::Spouse => (anchor, new_person),
        }
    }

    fn placement(self) -> PendingPlacement {
        match self {
            RelativeKind::Parent(_) => PendingPlacement::Before,
            RelativeKind::Child(_) => PendingPlacement::After,
            RelativeKind::Spouse => PendingPlacement::Beside,
        }
    }
}

/// The form data for a new person.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub bio: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl PersonDraft {
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            ..Self::default()
        }
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn born(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    fn to_request(&self, tree_id: &str) -> NewPerson {
        NewPerson {
            tree_id: tree_id.to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            gender: self.gender,
            bio: self.bio.clone().filter(|bio| !bio.trim().is_empty()),
            dob: self.dob,
        }
    }
}

/// A deletion awaiting confirmation, with everything it will remove.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub person: Person,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Interaction {
    #[default]
    Idle,
    Panning,
    Dragging {
        person_id: PersonId,
    },
}

/// Drives one tree view.
pub struct TreeController<A: TreeApi> {
    api: A,
    tree_id: TreeId,
    settings: ViewSettings,
    state: ViewState,
    selected: Option<PersonId>,
    view_locked: bool,
    viewport: Viewport,
    interaction: Interaction,
    notices: Vec<Notice>,
    pane_listener: Option<PaneListener>,
    history: CommandHistory,
    /// A deletion asked for from the keyboard, waiting for Enter or Escape.
    pending_delete: Option<DeleteRequest>,
    pending_counter: u64,
}

impl<A: TreeApi> TreeController<A> {
    pub fn new(api: A, tree_id: impl Into<TreeId>, settings: ViewSettings) -> Self {
        Self {
            api,
            tree_id: tree_id.into(),
            settings,
            state: ViewState::Loading,
            selected: None,
            view_locked: false,
            viewport: Viewport::default(),
            interaction: Interaction::Idle,
            notices: Vec::new(),
            pane_listener: None,
            history: CommandHistory::new(),
            pending_delete: None,
            pending_counter: 0,
        }
    }

    pub fn set_pane_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&PaneEvent) + Send + 'static,
    {
        self.pane_listener = Some(Box::new(listener));
    }

    pub fn set_viewport_size(&mut self, size: DVec2) {
        self.viewport.size = size;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tree_id(&self) -> &str {
        &self.tree_id
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> Option<&TreeView> {
        match &self.state {
            ViewState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn displayed(&self) -> Option<&GraphView> {
        self.view().map(|view| &view.displayed)
    }

    pub fn mode(&self) -> Option<&DisplayMode> {
        self.view().map(|view| &view.mode)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.settings.direction()
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_view_locked(&self) -> bool {
        self.view_locked
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands the pending notices to the caller, who shows them once.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches the tree and lays it out.  Also serves as retry after a failure.
    pub async fn load(&mut self) -> Result<(), ControllerError> {
        let mode = self.mode().cloned().unwrap_or_default();
        self.state = ViewState::Loading;

        let tree = match self.api.fetch_tree(&self.tree_id).await {
            Ok(tree) => tree,
            Err(err) => {
                self.fail_load(&err);
                return Err(err.into());
            }
        };

        self.apply_tree(tree, mode);
        self.fit_view();
        Ok(())
    }

    /// Refetches after a successful mutation.  A failure here does not undo the mutation; the
    /// view moves to `Failed` and a notice explains it.
    async fn resync(&mut self) {
        let mode = self.mode().cloned().unwrap_or_default();
        match self.api.fetch_tree(&self.tree_id).await {
            Ok(tree) => self.apply_tree(tree, mode),
            Err(err) => {
                self.fail_load(&err);
                self.notices.push(Notice::error(format!(
                    "The change was saved, but the tree could not be reloaded: {}",
                    err
                )));
            }
        }
    }

    fn fail_load(&mut self, err: &ApiError) {
        log::warn!("Failed to load tree {}: {}", self.tree_id, err);
        let failure = if err.is_forbidden() {
            LoadFailure::PermissionDenied
        } else {
            LoadFailure::Failed(err.to_string())
        };
        self.state = ViewState::Failed(failure);
    }

    fn apply_tree(&mut self, tree: TreeData, mode: DisplayMode) {
        let graph = FamilyGraph::from_tree(&tree);

        let mode = match mode {
            DisplayMode::Focus { person_id } if graph.contains(&person_id) => {
                DisplayMode::Focus { person_id }
            }
            DisplayMode::Focus { person_id } => {
                log::info!("Focused person {} is gone, leaving focus mode", person_id);
                DisplayMode::Normal
            }
            DisplayMode::Normal => DisplayMode::Normal,
        };

        if let Some(selected) = &self.selected {
            if !graph.contains(selected) {
                self.selected = None;
            }
        }
        if let Some(request) = &self.pending_delete {
            if !graph.contains(&request.person.id) {
                self.pending_delete = None;
            }
        }

        let full = GraphView::from_graph(&graph, &self.settings);
        let displayed = displayed_view(&graph, &full, &mode, &self.settings);
        log::debug!(
            "Tree {} has {} people, {} shown",
            self.tree_id,
            graph.person_count(),
            displayed.nodes.len()
        );

        self.state = ViewState::Ready(TreeView {
            name: tree.name,
            role: tree.role,
            graph,
            full,
            displayed,
            mode,
        });
    }

    fn fit_view(&mut self) {
        if let ViewState::Ready(view) = &self.state {
            if let Some(bounds) = view.displayed.bounds() {
                self.viewport.fit_to(&bounds);
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    fn editable_view(&self) -> Result<&TreeView, ControllerError> {
        match &self.state {
            ViewState::Ready(view) if view.role.can_edit() => Ok(view),
            ViewState::Ready(view) => Err(ControllerError::ReadOnly(view.role)),
            _ => Err(ControllerError::NotReady),
        }
    }

    fn displayed_mut(&mut self) -> Option<&mut GraphView> {
        match &mut self.state {
            ViewState::Ready(view) => Some(&mut view.displayed),
            _ => None,
        }
    }

    fn snapshot(&self) -> Option<GraphView> {
        self.displayed().cloned()
    }

    fn rollback(&mut self, snapshot: Option<GraphView>) {
        if let (Some(snapshot), Some(displayed)) = (snapshot, self.displayed_mut()) {
            *displayed = snapshot;
        }
    }

    fn next_pending_id(&mut self) -> String {
        self.pending_counter += 1;
        format!("pending-{}", self.pending_counter)
    }

    fn report_failure(&mut self, context: &str, err: &ApiError) {
        log::warn!("{}: {}", context, err);
        self.notices.push(Notice::error(format!("{}: {}", context, err)));
    }

    /// Compensates for a person whose relationship could not be created.
    async fn delete_orphan(&mut self, person_id: &str) {
        if let Err(err) = self.api.delete_person(person_id).await {
            log::error!("Failed to remove orphaned person {}: {}", person_id, err);
        }
    }

    fn select_if_shown(&mut self, person_id: &str) {
        if self.displayed().is_some_and(|view| view.contains(person_id)) {
            self.selected = Some(person_id.to_string());
        }
    }

    /// Creates a person and links them to `anchor_id`.  Returns the new person's id.
    pub async fn add_relative(
        &mut self,
        anchor_id: &str,
        kind: RelativeKind,
        draft: PersonDraft,
    ) -> Result<PersonId, ControllerError> {
        let view = self.editable_view()?;
        if !view.graph.contains(anchor_id) {
            return Err(ControllerError::UnknownPerson(anchor_id.to_string()));
        }

        let request = draft.to_request(&self.tree_id);
        let label = describe(&request.preview(""));

        // Optimistic node and edge
        let pending_id = self.next_pending_id();
        let (first, second) = kind.endpoints(anchor_id, &pending_id);
        let pending_edge = GraphEdge {
            id: format!("{}-edge", pending_id),
            source: first.to_string(),
            target: second.to_string(),
            relationship_type: kind.relationship_type(),
            pending: true,
        };
        let preview = request.preview(pending_id.clone());
        let snapshot = self.snapshot();
        let settings = self.settings;
        if let Some(displayed) = self.displayed_mut() {
            displayed.add_pending(
                &preview,
                Some((anchor_id, kind.placement())),
                Some(pending_edge),
                &settings,
            );
        }

        let person = match self.api.create_person(&request).await {
            Ok(person) => person,
            Err(err) => {
                self.rollback(snapshot);
                self.report_failure(&format!("Could not add {}", label), &err);
                return Err(err.into());
            }
        };

        let (first, second) = kind.endpoints(anchor_id, &person.id);
        let relationship_request = NewRelationship {
            tree_id: self.tree_id.clone(),
            person_1_id: first.to_string(),
            person_2_id: second.to_string(),
            relationship_type: kind.relationship_type(),
        };
        let relationship = match self.api.create_relationship(&relationship_request).await {
            Ok(relationship) => relationship,
            Err(err) => {
                self.delete_orphan(&person.id).await;
                self.rollback(snapshot);
                self.report_failure(&format!("Could not link {}", label), &err);
                return Err(err.into());
            }
        };

        log::info!(
            "Added {} as {} of {}",
            person.id,
            relationship.relationship_type,
            anchor_id
        );
        self.history.record(HistoryEntry::AddPerson {
            person: person.clone(),
            relationship: Some(relationship),
        });
        self.resync().await;
        self.select_if_shown(&person.id);
        Ok(person.id)
    }

    /// Creates a person without any relationship.
    pub async fn add_root_person(
        &mut self,
        draft: PersonDraft,
    ) -> Result<PersonId, ControllerError> {
        self.editable_view()?;

        let request = draft.to_request(&self.tree_id);
        let label = describe(&request.preview(""));

        let pending_id = self.next_pending_id();
        let preview = request.preview(pending_id);
        let snapshot = self.snapshot();
        let settings = self.settings;
        if let Some(displayed) = self.displayed_mut() {
            displayed.add_pending(&preview, None, None, &settings);
        }

        let person = match self.api.create_person(&request).await {
            Ok(person) => person,
            Err(err) => {
                self.rollback(snapshot);
                self.report_failure(&format!("Could not add {}", label), &err);
                return Err(err.into());
            }
        };

        self.history.record(HistoryEntry::AddPerson {
            person: person.clone(),
            relationship: None,
        });
        self.resync().await;
        self.select_if_shown(&person.id);
        Ok(person.id)
    }

    /// First step of a deletion: captures the person and every relationship that will go with
    /// them, for the confirmation prompt and for history.
    pub fn request_delete(&self, person_id: &str) -> Result<DeleteRequest, ControllerError> {
        let view = self.editable_view()?;
        let person = view
            .graph
            .person(person_id)
            .cloned()
            .ok_or_else(|| ControllerError::UnknownPerson(person_id.to_string()))?;
        let relationships = view.graph.relationships_of(person_id).cloned().collect();
        Ok(DeleteRequest {
            person,
            relationships,
        })
    }

    /// Second step of a deletion.
    pub async fn confirm_delete(&mut self, request: DeleteRequest) -> Result<(), ControllerError> {
        self.editable_view()?;

        let person_id = request.person.id.clone();
        let snapshot = self.snapshot();
        let previous_selection = self.selected.clone();
        if let Some(displayed) = self.displayed_mut() {
            displayed.remove_person(&person_id);
        }
        if self.selected.as_deref() == Some(person_id.as_str()) {
            self.selected = None;
        }

        if self
            .pending_delete
            .as_ref()
            .is_some_and(|pending| pending.person.id == person_id)
        {
            self.pending_delete = None;
        }

        if let Err(err) = self.api.delete_person(&person_id).await {
            self.rollback(snapshot);
            self.selected = previous_selection;
            let context = format!("Could not delete {}", describe(&request.person));
            self.report_failure(&context, &err);
            return Err(err.into());
        }

        log::info!(
            "Deleted {} and {} relationship(s)",
            person_id,
            request.relationships.len()
        );
        self.history.record(HistoryEntry::DeletePerson {
            person: request.person,
            relationships: request.relationships,
        });
        self.resync().await;
        Ok(())
    }

    /// Reverts the most recent mutation.
    ///
    /// Only additions can be reverted.  Reverting a deletion is refused with a notice and
    /// [`ControllerError::UndoUnsupported`]; the deletion is dropped from history so that the
    /// entries before it can still be undone.
    pub async fn undo(&mut self) -> Result<(), ControllerError> {
        let entry = self
            .history
            .undo_candidate()
            .cloned()
            .ok_or(ControllerError::NothingToUndo)?;
        self.editable_view()?;

        match entry {
            HistoryEntry::AddPerson { person, .. } => {
                if let Err(err) = self.api.delete_person(&person.id).await {
                    let context = format!("Could not undo adding {}", describe(&person));
                    self.report_failure(&context, &err);
                    return Err(err.into());
                }
                self.history.mark_undone();
                if self.selected.as_deref() == Some(person.id.as_str()) {
                    self.selected = None;
                }
                self.resync().await;
                Ok(())
            }
            HistoryEntry::DeletePerson { person, .. } => {
                self.history.discard_undo_candidate();
                self.notices.push(Notice::info(format!(
                    "Undoing the deletion of {} is not supported yet",
                    describe(&person)
                )));
                Err(ControllerError::UndoUnsupported)
            }
        }
    }

    /// Re-applies the most recently undone addition.
    ///
    /// A re-created person gets a new id from the service; the stored relationship is pointed at
    /// that id before it is re-created, and the history entry is updated with both.  Deletions
    /// never reach the redo side, since undoing them only drops them from history.
    pub async fn redo(&mut self) -> Result<(), ControllerError> {
        let Some(HistoryEntry::AddPerson {
            person,
            relationship,
        }) = self.history.redo_candidate().cloned()
        else {
            return Err(ControllerError::NothingToRedo);
        };
        self.editable_view()?;
        let context = format!("Could not redo adding {}", describe(&person));

        let mut request = NewPerson::from_person(&person);
        request.tree_id = self.tree_id.clone();
        let created = match self.api.create_person(&request).await {
            Ok(created) => created,
            Err(err) => {
                self.report_failure(&context, &err);
                return Err(err.into());
            }
        };

        let relationship = match relationship {
            Some(relationship) => {
                let mut request = NewRelationship::from_relationship(&relationship)
                    .retarget(&person.id, &created.id);
                request.tree_id = self.tree_id.clone();
                match self.api.create_relationship(&request).await {
                    Ok(relationship) => Some(relationship),
                    Err(err) => {
                        self.delete_orphan(&created.id).await;
                        self.report_failure(&context, &err);
                        return Err(err.into());
                    }
                }
            }
            None => None,
        };

        self.history.mark_redone(HistoryEntry::AddPerson {
            person: created.clone(),
            relationship,
        });
        self.resync().await;
        self.select_if_shown(&created.id);
        Ok(())
    }

    // =========================================================================
    // Selection, focus and direction
    // =========================================================================

    pub fn select(&mut self, person_id: &str) -> Result<(), ControllerError> {
        let displayed = self.displayed().ok_or(ControllerError::NotReady)?;
        if !displayed.contains(person_id) {
            return Err(ControllerError::UnknownPerson(person_id.to_string()));
        }
        self.selected = Some(person_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The deletion started with the Delete key, if it awaits confirmation.
    pub fn pending_delete(&self) -> Option<&DeleteRequest> {
        self.pending_delete.as_ref()
    }

    /// Abandons a pending deletion.  Returns false if there was none.
    pub fn cancel_delete(&mut self) -> bool {
        self.pending_delete.take().is_some()
    }

    /// Enters focus mode on the selected person, or leaves it.
    pub fn toggle_focus_mode(&mut self) -> Result<DisplayMode, ControllerError> {
        let selected = self.selected.clone();
        let settings = self.settings;
        let ViewState::Ready(view) = &mut self.state else {
            return Err(ControllerError::NotReady);
        };

        if matches!(view.mode, DisplayMode::Focus { .. }) {
            view.mode = DisplayMode::Normal;
            view.displayed = view.full.clone();
        } else {
            let person_id = selected.ok_or(ControllerError::NothingSelected)?;
            if !view.graph.contains(&person_id) {
                return Err(ControllerError::UnknownPerson(person_id));
            }
            let focus = view.graph.lineage_focus(&person_id);
            view.displayed = GraphView::from_focus(&view.graph, &focus, &settings);
            view.mode = DisplayMode::Focus { person_id };
        }

        let mode = view.mode.clone();
        self.fit_view();
        Ok(mode)
    }

    /// Switches between top-to-bottom and left-to-right, re-laying out and re-fitting.
    pub fn toggle_direction(&mut self) -> Direction {
        let direction = self.settings.direction().toggled();
        self.set_direction(direction);
        direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.settings.layout.direction = direction;
        let settings = self.settings;
        if let ViewState::Ready(view) = &mut self.state {
            view.full.relayout(&settings);
            view.displayed.relayout(&settings);
        }
        self.fit_view();
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handles a key press.  Returns whether the key was used.
    pub async fn handle_key(&mut self, event: KeyEvent) -> Result<bool, ControllerError> {
        if event.text_input_focused {
            return Ok(false);
        }

        if event.has_primary() {
            let redo = event.key.is_letter('z') && event.has_shift();
            let result = if redo || event.key.is_letter('y') {
                self.redo().await
            } else if event.key.is_letter('z') {
                self.undo().await
            } else {
                return Ok(false);
            };
            return match result {
                Ok(()) => Ok(true),
                Err(ControllerError::NothingToUndo | ControllerError::NothingToRedo) => Ok(false),
                Err(err) => Err(err),
            };
        }

        if !event.is_plain() {
            return Ok(false);
        }

        match event.key {
            key if key.is_arrow() => Ok(self.navigate(key)),
            Key::Delete => {
                let Some(selected) = self.selected.clone() else {
                    return Ok(false);
                };
                self.pending_delete = Some(self.request_delete(&selected)?);
                Ok(true)
            }
            Key::Enter => match self.pending_delete.take() {
                Some(request) => {
                    self.confirm_delete(request).await?;
                    Ok(true)
                }
                None => Ok(false),
            },
            Key::Escape => {
                if self.cancel_delete() {
                    return Ok(true);
                }
                if matches!(self.mode(), Some(DisplayMode::Focus { .. })) {
                    self.toggle_focus_mode()?;
                } else if self.selected.is_some() {
                    self.clear_selection();
                } else {
                    return Ok(false);
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Moves the selection along an edge: up to the first parent, down to the first child,
    /// sideways to the first spouse.  Only people on screen qualify.
    fn navigate(&mut self, key: Key) -> bool {
        let Some(selected) = self.selected.as_deref() else {
            return false;
        };
        let ViewState::Ready(view) = &self.state else {
            return false;
        };

        let candidates = match key {
            Key::ArrowUp => view.graph.parents_of(selected),
            Key::ArrowDown => view.graph.children_of(selected),
            Key::ArrowLeft | Key::ArrowRight => view.graph.spouses_of(selected),
            _ => return false,
        };
        let Some(next) = candidates.iter().find(|id| view.displayed.contains(id)) else {
            return false;
        };
        let center = view.displayed.node(next).map(GraphNode::center);

        self.selected = Some(next.clone());
        if let Some(center) = center {
            self.viewport.center_on(center);
        }
        true
    }

    // =========================================================================
    // Pointer interaction
    // =========================================================================

    fn emit(&mut self, event: PaneEvent) {
        if let Some(listener) = self.pane_listener.as_mut() {
            listener(&event);
        }
    }

    /// Locks or unlocks pan, zoom and drag.  Locking ends any interaction in progress.
    pub fn set_view_locked(&mut self, locked: bool) {
        if locked {
            self.end_pan();
            self.end_drag();
        }
        self.view_locked = locked;
    }

    pub fn begin_pan(&mut self) -> bool {
        if self.view_locked || self.interaction != Interaction::Idle {
            return false;
        }
        self.interaction = Interaction::Panning;
        self.emit(PaneEvent::PanStarted);
        true
    }

    pub fn pan_by(&mut self, screen_delta: DVec2) -> bool {
        if self.interaction != Interaction::Panning {
            return false;
        }
        self.viewport.pan_by(screen_delta);
        true
    }

    pub fn end_pan(&mut self) {
        if self.interaction == Interaction::Panning {
            self.interaction = Interaction::Idle;
            self.emit(PaneEvent::PanEnded);
        }
    }

    pub fn zoom_by(&mut self, factor: f64) -> bool {
        if self.view_locked {
            return false;
        }
        self.viewport.zoom_by(factor);
        true
    }

    /// Starts dragging a node.  The start signal goes out before any movement.
    pub fn begin_drag(&mut self, person_id: &str) -> bool {
        if self.view_locked || self.interaction != Interaction::Idle {
            return false;
        }
        if !self.displayed().is_some_and(|view| view.contains(person_id)) {
            return false;
        }
        self.interaction = Interaction::Dragging {
            person_id: person_id.to_string(),
        };
        self.emit(PaneEvent::DragStarted {
            person_id: person_id.to_string(),
        });
        true
    }

    pub fn drag_by(&mut self, screen_delta: DVec2) -> bool {
        let Interaction::Dragging { person_id } = &self.interaction else {
            return false;
        };
        let person_id = person_id.clone();
        let delta = self.viewport.to_layout_delta(screen_delta);
        self.displayed_mut()
            .is_some_and(|view| view.translate_node(&person_id, delta))
    }

    pub fn end_drag(&mut self) {
        if !matches!(self.interaction, Interaction::Dragging { .. }) {
            return;
        }
        if let Interaction::Dragging { person_id } = std::mem::take(&mut self.interaction) {
            self.emit(PaneEvent::DragEnded { person_id });
        }
    }
}

fn displayed_view(
    graph: &FamilyGraph,
    full: &GraphView,
    mode: &DisplayMode,
    settings: &ViewSettings,
) -> GraphView {
    match mode {
        DisplayMode::Normal => full.clone(),
        DisplayMode::Focus { person_id } => {
            GraphView::from_focus(graph, &graph.lineage_focus(person_id), settings)
        }
    }
}

/// Name for notices; falls back for people without a name.
fn describe(person: &Person) -> String {
    let name = person.display_name();
    if name.is_empty() {
        "the new person".to_string()
    } else {
        name
    }
}

// End of File
