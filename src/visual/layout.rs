//! Panel placement.
//!
//! Panels are stacked edge to edge, with no gap, inside groups; groups are
//! stacked along the engine's root axis. Sizes change whenever the views are
//! recomputed, so positions are always derived, never stored by callers.

use crate::core::{BellError, Result};

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// What a panel shows. Each kind appears at most once in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelContent {
    /// Text drawing of the gate sequence.
    CircuitDiagram,
    /// Amplitude grid of the final statevector.
    StateGrid,
    /// Amplitude grid of the circuit's unitary.
    UnitaryGrid,
    /// Measurement counts as bars.
    Histogram,
    /// Basis states placed on the q-sphere.
    QSphere,
}

impl PanelContent {
    /// Short identifier, used in file names and log fields.
    pub fn name(self) -> &'static str {
        match self {
            PanelContent::CircuitDiagram => "circuit",
            PanelContent::StateGrid => "statevector",
            PanelContent::UnitaryGrid => "unitary",
            PanelContent::Histogram => "histogram",
            PanelContent::QSphere => "qsphere",
        }
    }
}

/// A rectangle on the surface and the view it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width, border included.
    pub width: u32,
    /// Height, border included.
    pub height: u32,
    /// View shown inside.
    pub content: PanelContent,
}

impl Panel {
    /// Unplaced panel of the given size.
    pub fn new(content: PanelContent, width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height, content }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the two rectangles share any area.
    pub fn overlaps(&self, other: &Panel) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Panels stacked along one axis from an anchor point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelGroup {
    axis: Axis,
    anchor: (u32, u32),
    panels: Vec<Panel>,
}

impl PanelGroup {
    /// Left-to-right group whose first panel's top-left is `anchor`.
    pub fn horizontal(anchor: (u32, u32)) -> Self {
        Self { axis: Axis::Horizontal, anchor, panels: Vec::new() }
    }

    /// Top-to-bottom group whose first panel's top-left is `anchor`.
    pub fn vertical(anchor: (u32, u32)) -> Self {
        Self { axis: Axis::Vertical, anchor, panels: Vec::new() }
    }

    /// Stacking direction.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Top-left corner of the first panel.
    pub fn anchor(&self) -> (u32, u32) {
        self.anchor
    }

    /// Moves the group; takes effect on the next `arrange`.
    pub fn set_anchor(&mut self, anchor: (u32, u32)) {
        self.anchor = anchor;
    }

    /// Appends a panel; positions are assigned by the next [`arrange`](Self::arrange).
    pub fn push(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, panel: Panel) -> Self {
        self.push(panel);
        self
    }

    /// Places each panel right after (or below) the previous one.
    pub fn arrange(&mut self) {
        let (mut x, mut y) = self.anchor;
        for panel in &mut self.panels {
            panel.x = x;
            panel.y = y;
            match self.axis {
                Axis::Horizontal => {
                    x = panel.right();
                    panel.y = self.anchor.1;
                }
                Axis::Vertical => {
                    y = panel.bottom();
                    panel.x = self.anchor.0;
                }
            }
        }
    }

    /// Size of the bounding box of the arranged panels.
    pub fn extent(&self) -> (u32, u32) {
        let (ax, ay) = self.anchor;
        let right = self.panels.iter().map(Panel::right).max().unwrap_or(ax);
        let bottom = self.panels.iter().map(Panel::bottom).max().unwrap_or(ay);
        (right.saturating_sub(ax), bottom.saturating_sub(ay))
    }

    /// Panels in stacking order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    fn panel_mut(&mut self, content: PanelContent) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.content == content)
    }
}

/// Owns every panel group and keeps them from overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEngine {
    axis: Axis,
    origin: (u32, u32),
    groups: Vec<PanelGroup>,
}

impl LayoutEngine {
    /// Empty engine stacking groups along `axis` from `origin`.
    pub fn new(axis: Axis, origin: (u32, u32)) -> Self {
        Self { axis, origin, groups: Vec::new() }
    }

    /// Appends a group after the existing ones.
    pub fn add_group(&mut self, group: PanelGroup) {
        self.groups.push(group);
    }

    /// Re-anchors each group after the previous group's extent and arranges it.
    pub fn arrange(&mut self) {
        let (mut x, mut y) = self.origin;
        for group in &mut self.groups {
            group.set_anchor((x, y));
            group.arrange();
            let (w, h) = group.extent();
            match self.axis {
                Axis::Horizontal => x += w,
                Axis::Vertical => y += h,
            }
        }
    }

    /// Sets the size of the panel showing `content`. Call
    /// [`arrange`](Self::arrange) afterwards.
    pub fn resize(&mut self, content: PanelContent, width: u32, height: u32) -> Result<()> {
        let panel = self
            .groups
            .iter_mut()
            .find_map(|g| g.panel_mut(content))
            .ok_or_else(|| BellError::invalid(format!("no panel shows {}", content.name())))?;
        panel.width = width;
        panel.height = height;
        Ok(())
    }

    /// The panel showing `content`, if any.
    pub fn panel(&self, content: PanelContent) -> Option<&Panel> {
        self.panels().find(|p| p.content == content)
    }

    /// Every panel, group by group.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.groups.iter().flat_map(|g| g.panels().iter())
    }

    /// Groups in stacking order.
    pub fn groups(&self) -> &[PanelGroup] {
        &self.groups
    }

    /// Width and height covered by all groups, measured from the origin.
    pub fn extent(&self) -> (u32, u32) {
        let (ox, oy) = self.origin;
        let right = self.panels().map(Panel::right).max().unwrap_or(ox);
        let bottom = self.panels().map(Panel::bottom).max().unwrap_or(oy);
        (right.saturating_sub(ox), bottom.saturating_sub(oy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_panels(mut group: PanelGroup) -> PanelGroup {
        group.push(Panel::new(PanelContent::StateGrid, 100, 50));
        group.push(Panel::new(PanelContent::UnitaryGrid, 80, 60));
        group
    }

    #[test]
    fn horizontal_group_places_panels_side_by_side() {
        let mut group = two_panels(PanelGroup::horizontal((0, 0)));
        group.arrange();
        let lefts: Vec<_> = group.panels().iter().map(|p| p.x).collect();
        let tops: Vec<_> = group.panels().iter().map(|p| p.y).collect();
        assert_eq!(lefts, vec![0, 100]);
        assert_eq!(tops, vec![0, 0]);
        assert_eq!(group.extent(), (180, 60));
    }

    #[test]
    fn vertical_group_stacks_panels() {
        let mut group = two_panels(PanelGroup::vertical((0, 0)));
        group.arrange();
        let tops: Vec<_> = group.panels().iter().map(|p| p.y).collect();
        let lefts: Vec<_> = group.panels().iter().map(|p| p.x).collect();
        assert_eq!(tops, vec![0, 50]);
        assert_eq!(lefts, vec![0, 0]);
    }

    #[test]
    fn arrange_is_idempotent() {
        let mut group = two_panels(PanelGroup::horizontal((5, 7)));
        group.arrange();
        let once = group.clone();
        group.arrange();
        assert_eq!(group, once);
        assert_eq!(group.panels()[0].x, 5);
        assert_eq!(group.panels()[1].y, 7);
    }

    #[test]
    fn engine_stacks_groups_and_reflows_after_resize() -> Result<()> {
        let mut engine = LayoutEngine::new(Axis::Vertical, (1, 1));
        engine.add_group(
            PanelGroup::horizontal((0, 0))
                .with(Panel::new(PanelContent::CircuitDiagram, 30, 4))
                .with(Panel::new(PanelContent::Histogram, 20, 6)),
        );
        engine.add_group(two_panels(PanelGroup::horizontal((0, 0))));
        engine.arrange();
        assert_eq!(engine.panel(PanelContent::StateGrid).map(|p| (p.x, p.y)), Some((1, 7)));

        engine.resize(PanelContent::Histogram, 20, 10)?;
        engine.arrange();
        assert_eq!(engine.panel(PanelContent::StateGrid).map(|p| (p.x, p.y)), Some((1, 11)));
        assert_eq!(engine.extent(), (180, 70));

        let panels: Vec<_> = engine.panels().collect();
        for (i, a) in panels.iter().enumerate() {
            for b in &panels[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
        Ok(())
    }

    #[test]
    fn resizing_an_absent_panel_fails() {
        let mut engine = LayoutEngine::new(Axis::Horizontal, (0, 0));
        assert!(engine.resize(PanelContent::QSphere, 1, 1).is_err());
    }
}
