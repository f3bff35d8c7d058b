use glam::Vec3;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{DragContext, DragController};
use crate::annotation::{self, regroup};
use crate::naming::{EventType, GroupKey, Role};
use crate::reactive::Shared;
use crate::scene::{index, NodeId, SceneNode, SceneRepository};

/// Committed geometry of one cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneParams {
    /// Page (section sequence) number, unique per section.
    pub page: u32,
    /// Fixed corner.
    pub p1: Vec3,
    /// Dragged corner.
    pub p2: Vec3,
    /// Edge A–C in millimetres.
    pub length: u32,
    /// Mean absolute X of the corners in millimetres.
    pub width: u32,
    /// Edge A–D in millimetres.
    pub depth: u32,
}

impl PlaneParams {
    /// Read one measurement.
    #[must_use]
    pub fn dimension(&self, which: Dimension) -> u32 {
        match which {
            Dimension::Length => self.length,
            Dimension::Width => self.width,
            Dimension::Depth => self.depth,
        }
    }
}

/// Measurement selector for [`PlaneParamsList::average`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Section length.
    Length,
    /// Section width.
    #[default]
    Width,
    /// Section depth.
    Depth,
}

/// All sections of a view, keyed by page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaneParamsList(Vec<PlaneParams>);

impl PlaneParamsList {
    /// Entry for `page`.
    #[must_use]
    pub fn get(&self, page: u32) -> Option<&PlaneParams> {
        self.0.iter().find(|p| p.page == page)
    }

    /// Mutable entry for `page`.
    pub fn get_mut(&mut self, page: u32) -> Option<&mut PlaneParams> {
        self.0.iter_mut().find(|p| p.page == page)
    }

    /// Add or replace the entry for `params.page`.
    pub fn upsert(&mut self, params: PlaneParams) {
        match self.get_mut(params.page) {
            Some(existing) => *existing = params,
            None => self.0.push(params),
        }
    }

    /// Drop the entry for `page`.
    pub fn remove(&mut self, page: u32) -> Option<PlaneParams> {
        let at = self.0.iter().position(|p| p.page == page)?;
        Some(self.0.remove(at))
    }

    /// One past the highest page in use, starting at 1.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.0.iter().map(|p| p.page).max().map_or(1, |p| p + 1)
    }

    /// Mean of one measurement over every section; `None` when empty.
    #[must_use]
    pub fn average(&self, which: Dimension) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        let sum: f64 =
            self.0.iter().map(|p| f64::from(p.dimension(which))).sum();
        Some(sum / self.0.len() as f64)
    }

    /// Entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaneParams> {
        self.0.iter()
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlaneParamsList {
    type Item = &'a PlaneParams;
    type IntoIter = std::slice::Iter<'a, PlaneParams>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Rebuilds a cross-section live while its end marker is dragged.
#[derive(Debug)]
pub struct PlaneDrag {
    params: Shared<PlaneParamsList>,
    draggables: Shared<Vec<NodeId>>,
    /// Page of the gesture in progress, read from the handle at start.
    active_page: Option<u32>,
    /// Pages whose setup artifacts are already gone.
    retired: FxHashSet<u32>,
}

impl PlaneDrag {
    /// Controller committing into `params` and registering new end markers
    /// in `draggables`.
    #[must_use]
    pub fn new(
        params: Shared<PlaneParamsList>,
        draggables: Shared<Vec<NodeId>>,
    ) -> Self {
        Self {
            params,
            draggables,
            active_page: None,
            retired: FxHashSet::default(),
        }
    }

    /// Committed section geometry.
    #[must_use]
    pub fn params(&self) -> Shared<PlaneParamsList> {
        self.params.clone()
    }

    /// Remove the double-click setup artifacts of `page`, once.
    fn retire_setup(&mut self, scene: &mut dyn SceneRepository, page: u32) {
        if !self.retired.insert(page) {
            return;
        }
        let setup = index::section_nodes(&*scene, page, EventType::DoubleClick);
        let removed = setup
            .into_iter()
            .filter(|id| scene.remove(*id).is_some())
            .count();
        log::debug!("retired {removed} setup artifacts of section {page}");
    }

    /// Build one generation at `end`, prune older ones, and return the new
    /// measurements.
    fn rebuild(
        ctx: &mut DragContext<'_>,
        params: &PlaneParams,
        end: Vec3,
    ) -> Option<(u32, u32, u32)> {
        let page = params.page;
        let key = GroupKey::Section {
            event: EventType::Drag,
            page,
        };
        let built = annotation::build_cross_section(
            params.p1,
            end,
            EventType::Drag,
            page,
            ctx.options,
        )
        .and_then(|section| {
            let markers = annotation::build_endpoint_markers(
                params.p1,
                end,
                EventType::Drag,
                page,
                ctx.camera,
                ctx.options,
            )?;
            Ok((section, markers))
        });
        let (section, markers) = match built {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("section {page} not rebuilt: {e}");
                return None;
            }
        };
        let dims = (section.length, section.width, section.depth);

        let group = match index::find_group(&*ctx.scene, &key) {
            Some(g) => g,
            None => ctx.scene.add(None, SceneNode::group(key)),
        };
        let nodes =
            section.into_nodes().into_iter().chain(markers.into_nodes());
        let _ = annotation::insert_all(&mut *ctx.scene, Some(group), nodes);

        let generation_len = ctx.options.section.generation_len();
        let _ = regroup::retain_latest_generation(
            &mut *ctx.scene,
            group,
            group,
            generation_len,
        );
        let _ = regroup::remove_empty_groups(&mut *ctx.scene);
        Some(dims)
    }
}

/// Page of a section handle, from its metadata or name.
fn section_page(scene: &dyn SceneRepository, node: NodeId) -> Option<u32> {
    scene.node(node).and_then(|n| n.group_key()).and_then(|k| k.page())
}

impl DragController for PlaneDrag {
    fn drag_start(
        &mut self,
        ctx: &mut DragContext<'_>,
        node: NodeId,
        _position: Vec3,
    ) {
        self.active_page = section_page(&*ctx.scene, node);
        if self.active_page.is_none() {
            log::warn!("dragged node {node:?} is not a section handle");
        }
    }

    fn drag(
        &mut self,
        ctx: &mut DragContext<'_>,
        _node: NodeId,
        position: Vec3,
    ) {
        let Some(page) = self.active_page else {
            return;
        };
        let Some(params) = self.params.with(|list| list.get(page).copied())
        else {
            log::debug!("no plane params for section {page}");
            return;
        };

        self.retire_setup(&mut *ctx.scene, page);
        let Some((length, width, depth)) =
            Self::rebuild(ctx, &params, position)
        else {
            return;
        };

        self.params.update(|list| {
            if let Some(p) = list.get_mut(page) {
                p.p2 = position;
                p.length = length;
                p.width = width;
                p.depth = depth;
            }
        });
    }

    fn drag_end(
        &mut self,
        ctx: &mut DragContext<'_>,
        _node: NodeId,
        _position: Vec3,
    ) {
        let Some(page) = self.active_page.take() else {
            return;
        };
        let key = GroupKey::Section {
            event: EventType::Drag,
            page,
        };
        let newest = index::find_group(&*ctx.scene, &key).and_then(|group| {
            ctx.scene
                .children_of(Some(group))
                .iter()
                .rev()
                .copied()
                .find(|id| {
                    ctx.scene.node(*id).and_then(|n| n.role())
                        == Some(Role::EndPoint)
                })
        });

        let scene = &*ctx.scene;
        self.draggables.update(|handles| {
            handles.retain(|id| scene.contains(*id));
            if let Some(id) = newest {
                if !handles.contains(&id) {
                    handles.push(id);
                }
            }
        });
    }
}
