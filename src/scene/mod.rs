//! Scene graph access: node model, repository interface, in-memory scene,
//! lookups and hit-testing.
//!
//! Components never reach for an ambient scene. Every builder, controller
//! and lookup takes a [`SceneRepository`] by reference and mutates nodes only
//! through it. [`Scene`] is the in-crate implementation; hosts backed by a
//! real renderer implement the trait over their own graph.

pub mod index;
mod node;
pub mod pick;

pub use node::{Color, LabelStyle, NodeId, NodeMeta, NodeShape, SceneNode};
use rustc_hash::FxHashMap;

// ---------------------------------------------------------------------------
// SceneRepository
// ---------------------------------------------------------------------------

/// Read/write access to a hierarchical scene graph.
///
/// The repository owns node lifetime. Callers hold [`NodeId`]s, which may go
/// stale when a node is removed; every accessor treats a stale id as absent.
pub trait SceneRepository {
    /// Top-level node ids in insertion order.
    fn roots(&self) -> &[NodeId];

    /// Read access to a node.
    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    /// Write access to a node.
    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode>;

    /// Container holding `id`, or `None` for top-level and unknown nodes.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Insert `node` under `parent` (top level for `None`) and return its id.
    ///
    /// Ids listed in `node.children` are ignored; attach children
    /// explicitly.
    fn add(&mut self, parent: Option<NodeId>, node: SceneNode) -> NodeId;

    /// Remove a node and its whole subtree. Returns the detached node.
    fn remove(&mut self, id: NodeId) -> Option<SceneNode>;

    /// Move an existing node under `parent`. Returns `false` when either id
    /// is unknown or the move would create a cycle.
    fn attach(&mut self, id: NodeId, parent: Option<NodeId>) -> bool;

    // -- Provided --

    /// Whether `id` refers to a live node.
    fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Children of `parent`, or the top level for `None`.
    fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            None => self.roots(),
            Some(p) => match self.node(p) {
                Some(node) => node.children(),
                None => &[],
            },
        }
    }

    /// Every node below `parent` in depth-first pre-order.
    fn descendants(&self, parent: Option<NodeId>) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> =
            self.children_of(parent).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children_of(Some(id)).iter().rev());
        }
        out
    }

    /// Toggle visibility. Returns `false` for unknown ids.
    fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// In-memory scene graph.
pub struct Scene {
    nodes: FxHashMap<NodeId, SceneNode>,
    parents: FxHashMap<NodeId, NodeId>,
    roots: Vec<NodeId>,
    next_id: u32,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            parents: FxHashMap::default(),
            roots: Vec::new(),
            next_id: 0,
            generation: 0,
            rendered_generation: 0,
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after redrawing).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Number of live nodes at every depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.parents.clear();
        self.roots.clear();
        self.invalidate();
    }

    fn detach(&mut self, id: NodeId) {
        match self.parents.remove(&id) {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|c| *c != id),
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parents.get(&id) {
                Some(p) => id = *p,
                None => return false,
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRepository for Scene {
    fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.invalidate();
        self.nodes.get_mut(&id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    fn add(&mut self, parent: Option<NodeId>, mut node: SceneNode) -> NodeId {
        if !node.metadata_matches_name() {
            log::warn!(
                "node '{}' carries metadata {:?} that disagrees with its name",
                node.name,
                node.metadata
            );
        }
        node.children.clear();

        let id = NodeId(self.next_id);
        self.next_id += 1;

        let parent = parent.filter(|p| self.nodes.contains_key(p));
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(&p) {
                    pn.children.push(id);
                }
                let _ = self.parents.insert(id, p);
            }
            None => self.roots.push(id),
        }
        let _ = self.nodes.insert(id, node);
        self.invalidate();
        id
    }

    fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        if !self.nodes.contains_key(&id) {
            return None;
        }
        self.detach(id);

        let mut stack = vec![id];
        let mut removed = None;
        while let Some(current) = stack.pop() {
            let _ = self.parents.remove(&current);
            if let Some(mut node) = self.nodes.remove(&current) {
                stack.append(&mut node.children);
                if current == id {
                    removed = Some(node);
                }
            }
        }
        self.invalidate();
        removed
    }

    fn attach(&mut self, id: NodeId, parent: Option<NodeId>) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) || self.is_ancestor(id, p) {
                return false;
            }
        }
        self.detach(id);
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(&p) {
                    pn.children.push(id);
                }
                let _ = self.parents.insert(id, p);
            }
            None => self.roots.push(id),
        }
        self.invalidate();
        true
    }
}
