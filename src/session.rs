//! Editing session
//!
//! Owns the graph, the registry and the cooker together with the identity
//! counter, the selection and the display flag. Every structural or
//! parameter edit goes through here so the cooker cache is invalidated
//! consistently.

use crate::constants;
use crate::geometry::Geometry;
use crate::nodes::{
    input_arity, ComputeNode, Cooker, Graph, GraphError, NodeId, NodeKind, NodeRegistry,
    ParameterChange, ParameterError, SlotIndex,
};
use crate::settings::Settings;
use log::{debug, info};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("unknown node type '{0}'")]
    UnknownType(String),
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0} cannot feed itself")]
    SelfConnection(NodeId),
    #[error("node {node} has {arity} input(s), slot {slot} is out of range")]
    SlotOutOfRange {
        node: NodeId,
        slot: SlotIndex,
        arity: usize,
    },
    #[error("connecting {from} to {to} would create a cycle")]
    WouldCycle { from: NodeId, to: NodeId },
    #[error("node {node} is a {actual}, not a {expected}")]
    WrongKind {
        node: NodeId,
        expected: &'static str,
        actual: &'static str,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

#[derive(Debug)]
pub struct Session {
    settings: Settings,
    registry: NodeRegistry,
    graph: Graph,
    cooker: Cooker,
    next_id: NodeId,
    selected: Option<NodeId>,
    display: Option<NodeId>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            cooker: Cooker::with_settings(&settings),
            settings,
            registry: NodeRegistry::with_builtin_nodes(),
            graph: Graph::new(),
            next_id: constants::node::FIRST_ID,
            selected: None,
            display: None,
        }
    }

    /// Create a node of `type_name` with the next free identity and add it
    /// to the graph. The node is named after its kind and id, e.g. `Grid1`.
    pub fn spawn(&mut self, type_name: &str) -> Result<NodeId, EditError> {
        let id = self.next_id;
        let mut node = self
            .registry
            .create(type_name, id)
            .ok_or_else(|| EditError::UnknownType(type_name.to_string()))?;
        let name = format!("{}{}", node.type_tag(), id);
        node.set_name(name);

        self.graph.add_node(node)?;
        self.next_id += 1;
        self.cooker.clear_cache();
        info!("Created node {} ({})", id, type_name);
        Ok(id)
    }

    /// Feed `src` into input `slot` of `dst`, replacing any previous source
    pub fn connect(&mut self, src: NodeId, dst: NodeId, slot: SlotIndex) -> Result<(), EditError> {
        if !self.graph.contains(src) {
            return Err(EditError::UnknownNode(src));
        }
        let arity = match self.graph.get(dst) {
            Some(node) => input_arity(node.type_tag()),
            None => return Err(EditError::UnknownNode(dst)),
        };
        if src == dst {
            return Err(EditError::SelfConnection(src));
        }
        if slot >= arity {
            return Err(EditError::SlotOutOfRange {
                node: dst,
                slot,
                arity,
            });
        }
        if self.graph.depends_on(src, dst) {
            return Err(EditError::WouldCycle { from: src, to: dst });
        }

        self.graph.connect(src, dst, slot);
        self.cooker.clear_cache();
        info!("Connected {} -> {}[{}]", src, dst, slot);
        Ok(())
    }

    /// Empty input `slot` of `dst`, returning the previous source
    pub fn disconnect(&mut self, dst: NodeId, slot: SlotIndex) -> Option<NodeId> {
        let removed = self.graph.disconnect(dst, slot);
        self.cooker.clear_cache();
        if let Some(src) = removed {
            info!("Disconnected {} -> {}[{}]", src, dst, slot);
        }
        removed
    }

    /// Apply a batch of parameter writes as one logical edit.
    ///
    /// The revision is bumped once even when a write fails part way, since
    /// the earlier writes of the batch have already landed.
    pub fn set_parameters(
        &mut self,
        id: NodeId,
        changes: &[ParameterChange],
    ) -> Result<(), EditError> {
        let node = self.graph.get_mut(id).ok_or(EditError::UnknownNode(id))?;
        let result = changes.iter().try_for_each(|change| node.set_parameter(change));
        node.bump_param_revision();
        debug!(
            "Node {} parameters now at revision {}",
            id,
            node.param_revision()
        );
        self.after_parameter_edit();
        result.map_err(EditError::from)
    }

    /// Typed edit of a node's fields; counts as one parameter edit
    pub fn edit<T, R>(&mut self, id: NodeId, f: impl FnOnce(&mut T) -> R) -> Result<R, EditError>
    where
        T: NodeKind,
    {
        let node = self.graph.get_mut(id).ok_or(EditError::UnknownNode(id))?;
        let actual = node.type_tag();
        let typed = node
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(EditError::WrongKind {
                node: id,
                expected: T::TYPE_TAG,
                actual,
            })?;
        let output = f(typed);
        typed.bump_param_revision();
        self.after_parameter_edit();
        Ok(output)
    }

    fn after_parameter_edit(&mut self) {
        if self.settings.conservative_invalidation {
            self.cooker.clear_cache();
        }
    }

    /// Display name only; never affects cooking
    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), EditError> {
        let node = self.graph.get_mut(id).ok_or(EditError::UnknownNode(id))?;
        node.set_name(name.into());
        Ok(())
    }

    pub fn select(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn set_display(&mut self, id: Option<NodeId>) {
        self.display = id;
    }

    pub fn display(&self) -> Option<NodeId> {
        self.display
    }

    /// Cooked geometry of the display node, empty when nothing is displayed
    pub fn display_geometry(&mut self) -> Arc<Geometry> {
        match self.display {
            Some(id) => self.cooker.evaluate(&self.graph, id),
            None => Arc::new(Geometry::empty()),
        }
    }

    pub fn evaluate(&mut self, id: NodeId) -> Arc<Geometry> {
        self.cooker.evaluate(&self.graph, id)
    }

    /// Starting scene: `Grid -> Transform -> Null`, with the Null displayed
    /// and selected. Returns the Null's id.
    pub fn build_default_graph(&mut self) -> Result<NodeId, EditError> {
        let grid = self.spawn("Grid")?;
        let transform = self.spawn("Transform")?;
        let null = self.spawn("Null")?;
        self.connect(grid, transform, 0)?;
        self.connect(transform, null, 0)?;

        self.set_display(Some(null));
        self.select(Some(null));
        Ok(null)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Used to register extension kinds
    pub fn registry_mut(&mut self) -> &mut NodeRegistry {
        &mut self.registry
    }

    pub fn cooker(&self) -> &Cooker {
        &self.cooker
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::sop::{GridNode, TransformNode};
    use crate::nodes::ParamValue;
    use glam::Vec3;

    #[test]
    fn test_default_graph() {
        let mut session = Session::default();
        let null = session.build_default_graph().unwrap();
        assert_eq!(null, 3);
        assert_eq!(session.display(), Some(3));
        assert_eq!(session.selected(), Some(3));
        assert_eq!(session.graph().all_node_ids(), vec![1, 2, 3]);
        assert_eq!(session.graph().inputs_of(3), vec![2]);

        let geometry = session.display_geometry();
        assert_eq!(geometry.point_count(), 400);
        assert_eq!(geometry.triangle_count(), 722);
    }

    #[test]
    fn test_spawn_names_and_ids() {
        let mut session = Session::default();
        assert_eq!(session.spawn("Grid").unwrap(), 1);
        assert_eq!(session.spawn("Merge").unwrap(), 2);
        assert_eq!(session.graph().get(1).unwrap().name(), "Grid1");
        assert_eq!(session.graph().get(2).unwrap().name(), "Merge2");

        assert_eq!(
            session.spawn("Sphere"),
            Err(EditError::UnknownType("Sphere".to_string()))
        );
        // a failed spawn does not consume an id
        assert_eq!(session.spawn("Null").unwrap(), 3);
    }

    #[test]
    fn test_connect_validation() {
        let mut session = Session::default();
        let grid = session.spawn("Grid").unwrap();
        let a = session.spawn("Transform").unwrap();
        let b = session.spawn("Transform").unwrap();

        assert_eq!(session.connect(grid, 99, 0), Err(EditError::UnknownNode(99)));
        assert_eq!(session.connect(99, a, 0), Err(EditError::UnknownNode(99)));
        assert_eq!(session.connect(a, a, 0), Err(EditError::SelfConnection(a)));
        assert_eq!(
            session.connect(a, grid, 0),
            Err(EditError::SlotOutOfRange {
                node: grid,
                slot: 0,
                arity: 0
            })
        );
        assert!(matches!(
            session.connect(grid, a, 1),
            Err(EditError::SlotOutOfRange { arity: 1, .. })
        ));

        session.connect(grid, a, 0).unwrap();
        session.connect(a, b, 0).unwrap();
        assert_eq!(
            session.connect(b, a, 0),
            Err(EditError::WouldCycle { from: b, to: a })
        );
        assert_eq!(session.graph().inputs_of(a), vec![grid]);
    }

    #[test]
    fn test_set_parameters_recooks() {
        let mut session = Session::default();
        let null = session.build_default_graph().unwrap();
        session.display_geometry();

        session
            .set_parameters(
                1,
                &[
                    ParameterChange::new("rows", ParamValue::Integer(3)),
                    ParameterChange::new("cols", ParamValue::Integer(3)),
                ],
            )
            .unwrap();
        assert_eq!(session.graph().get(1).unwrap().param_revision(), 2);
        assert!(session.cooker().is_empty());

        let geometry = session.evaluate(null);
        assert_eq!(geometry.point_count(), 9);
        assert_eq!(geometry.triangle_count(), 8);
    }

    #[test]
    fn test_failed_batch_still_bumps() {
        let mut session = Session::default();
        let grid = session.spawn("Grid").unwrap();
        let err = session
            .set_parameters(
                grid,
                &[
                    ParameterChange::new("rows", ParamValue::Integer(5)),
                    ParameterChange::new("bogus", ParamValue::Integer(1)),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, EditError::Parameter(ParameterError::Unknown { .. })));
        assert_eq!(session.graph().get(grid).unwrap().param_revision(), 2);
        assert_eq!(session.evaluate(grid).point_count(), 5 * 20);

        assert_eq!(
            session.set_parameters(42, &[]),
            Err(EditError::UnknownNode(42))
        );
    }

    #[test]
    fn test_typed_edit() {
        let mut session = Session::default();
        let null = session.build_default_graph().unwrap();

        let previous = session
            .edit::<TransformNode, _>(2, |xform| {
                std::mem::replace(&mut xform.translate, Vec3::new(0.0, 2.0, 0.0))
            })
            .unwrap();
        assert_eq!(previous, Vec3::ZERO);
        let geometry = session.evaluate(null);
        assert!(geometry.points().iter().all(|p| p.y == 2.0));

        let err = session
            .edit::<GridNode, _>(2, |grid| grid.rows = 2)
            .unwrap_err();
        assert_eq!(
            err,
            EditError::WrongKind {
                node: 2,
                expected: "Grid",
                actual: "Transform",
            }
        );
        assert_eq!(err.to_string(), "node 2 is a Transform, not a Grid");
        assert_eq!(session.graph().get(2).unwrap().param_revision(), 2);
    }

    #[test]
    fn test_narrow_invalidation_stays_fresh() {
        let settings = Settings {
            conservative_invalidation: false,
            ..Settings::default()
        };
        let mut session = Session::new(settings);
        let null = session.build_default_graph().unwrap();
        let before = session.evaluate(null);

        session
            .edit::<GridNode, _>(1, |grid| grid.rows = 4)
            .unwrap();
        assert!(!session.cooker().is_empty());

        let after = session.evaluate(null);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.point_count(), 4 * 20);
    }

    #[test]
    fn test_disconnect_empties_display() {
        let mut session = Session::default();
        let null = session.build_default_graph().unwrap();
        assert_eq!(session.disconnect(null, 0), Some(2));
        assert_eq!(session.disconnect(null, 0), None);
        assert!(session.display_geometry().is_empty());
    }

    #[test]
    fn test_rename_and_display() {
        let mut session = Session::default();
        let grid = session.spawn("Grid").unwrap();
        session.rename(grid, "floor").unwrap();
        assert_eq!(session.graph().get(grid).unwrap().name(), "floor");
        assert_eq!(session.rename(7, "x"), Err(EditError::UnknownNode(7)));

        assert!(session.display_geometry().is_empty());
        session.set_display(Some(grid));
        assert_eq!(session.display_geometry().point_count(), 400);
        session.set_display(None);
        assert!(session.display_geometry().is_empty());
    }
}
