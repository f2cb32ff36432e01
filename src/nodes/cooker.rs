//! Memoized graph evaluator
//!
//! `evaluate` walks the inputs of the requested node depth first, cooking
//! each node at most once per validity epoch. A node's cache entry is reused
//! only when its fingerprint (topology revision, own parameter revision,
//! direct inputs, their parameter revisions and resolved geometries) is
//! unchanged.
//!
//! The walk always recurses into every input before consulting the cache.
//! Freshness of deep ancestors reaches a node only through that recursion, so
//! any shortcut that skips it has to extend the fingerprint first.

use crate::geometry::Geometry;
use crate::nodes::cache::{CacheEntry, CacheStatistics, Fingerprint, NodeCache};
use crate::nodes::{ComputeNode, CookContext, CookError, Graph, NodeId};
use crate::settings::Settings;
use log::{debug, log_enabled, trace, warn, Level};
use std::collections::HashSet;
use std::sync::Arc;

/// Evaluator owning the per-node cook cache.
///
/// The graph is borrowed per call, so it cannot change while an evaluation is
/// running.
#[derive(Debug)]
pub struct Cooker {
    cache: NodeCache,
    validate_output: bool,
    /// Nodes on the current evaluation path
    in_progress: HashSet<NodeId>,
    /// Returned for unknown ids and failures; one instance per cooker so
    /// fingerprints of downstream nodes stay stable
    empty: Arc<Geometry>,
}

impl Cooker {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            cache: NodeCache::new(settings.track_statistics),
            validate_output: settings.validate_output,
            in_progress: HashSet::new(),
            empty: Arc::new(Geometry::empty()),
        }
    }

    /// Cooked geometry of `node_id`.
    ///
    /// Unknown ids and failed cooks both resolve to an empty geometry; use
    /// [`try_evaluate`](Self::try_evaluate) to see the failure.
    pub fn evaluate(&mut self, graph: &Graph, node_id: NodeId) -> Arc<Geometry> {
        match self.try_evaluate(graph, node_id) {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!("Evaluation of node {} failed: {}", node_id, err);
                Arc::clone(&self.empty)
            }
        }
    }

    /// Cooked geometry of `node_id`, or the first cook failure in its
    /// dependency tree. Unknown ids resolve to an empty geometry.
    pub fn try_evaluate(&mut self, graph: &Graph, node_id: NodeId) -> Result<Arc<Geometry>, CookError> {
        let result = self.evaluate_node(graph, node_id);
        debug_assert!(self.in_progress.is_empty());
        result
    }

    fn evaluate_node(&mut self, graph: &Graph, node_id: NodeId) -> Result<Arc<Geometry>, CookError> {
        let Some(node) = graph.get(node_id) else {
            return Ok(Arc::clone(&self.empty));
        };

        if !self.in_progress.insert(node_id) {
            return Err(CookError::Cycle { node: node_id });
        }
        let result = self.cook_node(graph, node);
        self.in_progress.remove(&node_id);
        result
    }

    fn cook_node(&mut self, graph: &Graph, node: &dyn ComputeNode) -> Result<Arc<Geometry>, CookError> {
        let node_id = node.id();
        let input_ids = graph.inputs_of(node_id);

        let mut input_param_revisions = Vec::with_capacity(input_ids.len());
        let mut input_geometries = Vec::with_capacity(input_ids.len());
        for &input_id in &input_ids {
            input_param_revisions.push(graph.get(input_id).map_or(0, |input| input.param_revision()));
            input_geometries.push(self.evaluate_node(graph, input_id)?);
        }

        let fingerprint = Fingerprint {
            topology_revision: graph.topology_revision(),
            param_revision: node.param_revision(),
            input_ids,
            input_param_revisions,
            input_geometries,
        };

        if let Some(geometry) = self.cache.lookup(node_id, &fingerprint) {
            debug!("Cache hit for node {} ({})", node_id, node.type_tag());
            return Ok(geometry);
        }
        if log_enabled!(Level::Trace) {
            if let Some(previous) = self.cache.get(node_id) {
                trace!(
                    "Fingerprint changed for node {}: topology {} -> {}, params {} -> {}, inputs {:?} -> {:?}",
                    node_id,
                    previous.fingerprint.topology_revision,
                    fingerprint.topology_revision,
                    previous.fingerprint.param_revision,
                    fingerprint.param_revision,
                    previous.fingerprint.input_ids,
                    fingerprint.input_ids,
                );
            }
        }

        let ctx = CookContext::new(node_id);
        let geometry = node
            .cook(&ctx, &fingerprint.input_geometries)
            .and_then(|geometry| {
                if self.validate_output {
                    geometry
                        .validate()
                        .map_err(|source| CookError::InvalidGeometry { node: node_id, source })?;
                }
                Ok(geometry)
            });

        let geometry = match geometry {
            Ok(geometry) => Arc::new(geometry),
            Err(err) => {
                // a failed cook must not leave an older result behind
                self.cache.invalidate(node_id);
                self.cache.record_failure();
                return Err(err);
            }
        };

        debug!(
            "Cooked node {} ({}): {} points, {} triangles",
            node_id,
            node.type_tag(),
            geometry.point_count(),
            geometry.triangle_count()
        );
        self.cache.insert(
            node_id,
            CacheEntry {
                geometry: Arc::clone(&geometry),
                fingerprint,
            },
        );
        Ok(geometry)
    }

    /// Drop every cache entry
    pub fn clear_cache(&mut self) {
        if !self.cache.is_empty() {
            debug!("Clearing {} cache entries", self.cache.len());
        }
        self.cache.clear();
    }

    /// Drop the entry for one node; returns whether there was one
    pub fn invalidate(&mut self, node_id: NodeId) -> bool {
        self.cache.invalidate(node_id)
    }

    /// Last stored geometry for `node_id`, which may be stale
    pub fn cached(&self, node_id: NodeId) -> Option<Arc<Geometry>> {
        self.cache.peek(node_id)
    }

    pub fn statistics(&self) -> &CacheStatistics {
        self.cache.statistics()
    }

    pub fn reset_statistics(&mut self) {
        self.cache.reset_statistics();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for Cooker {
    fn default() -> Self {
        Self::new()
    }
}
