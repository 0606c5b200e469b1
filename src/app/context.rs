//! Long-lived state shared by every transition.

use super::assets::AssetStore;
use super::views::ViewConfig;
use crate::visual::{Axis, LayoutEngine, Panel, PanelContent, PanelGroup};

/// Margin between the terminal edge (and the caption row) and the panels.
pub const LAYOUT_ORIGIN: (u32, u32) = (1, 2);

/// View settings, the panel layout and the optional asset directory.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Shots, pitch and tolerances.
    pub view_config: ViewConfig,
    /// Panel placement.
    pub layout: LayoutEngine,
    /// Where rendered views are mirrored, when configured.
    pub assets: Option<AssetStore>,
}

impl AppContext {
    /// Context with the standard two-row layout.
    pub fn new(view_config: ViewConfig, assets: Option<AssetStore>) -> Self {
        Self {
            view_config,
            layout: standard_layout(),
            assets,
        }
    }
}

/// Two rows: circuit and histogram on top, the amplitude views below.
/// Sizes are filled in by the first recomputation.
pub fn standard_layout() -> LayoutEngine {
    let mut layout = LayoutEngine::new(Axis::Vertical, LAYOUT_ORIGIN);
    layout.add_group(
        PanelGroup::horizontal(LAYOUT_ORIGIN)
            .with(Panel::new(PanelContent::CircuitDiagram, 0, 0))
            .with(Panel::new(PanelContent::Histogram, 0, 0)),
    );
    layout.add_group(
        PanelGroup::horizontal(LAYOUT_ORIGIN)
            .with(Panel::new(PanelContent::StateGrid, 0, 0))
            .with(Panel::new(PanelContent::UnitaryGrid, 0, 0))
            .with(Panel::new(PanelContent::QSphere, 0, 0)),
    );
    layout
}
