//! The five synchronized views and how they are derived from one circuit.

use crate::circuits::Circuit;
use crate::core::{BellStateSelector, Result, StateVector, UnitaryMatrix};
use crate::simulation::MeasurementCounts;
use crate::visual::{
    AmplitudeGrid, HistogramBar, Image, PanelContent, SpherePoint, histogram_bars, map_matrix, map_vector,
    plot_histogram, plot_qsphere, qsphere_points,
};

use super::assets::AssetStore;

/// Border plus title row around every panel's content.
pub const PANEL_PADDING: u32 = 2;

/// Settings for turning artifacts into views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Shots per measurement run.
    pub shots: u64,
    /// Distance between grid cells, in terminal cells.
    pub cell_pitch: u32,
    /// Probability below which a basis state gets no q-sphere marker.
    pub sphere_tolerance: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            cell_pitch: 3,
            sphere_tolerance: 1e-9,
        }
    }
}

/// Raw simulation output for one circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    /// Final state from |00>.
    pub state: StateVector,
    /// Matrix of the whole circuit.
    pub unitary: UnitaryMatrix,
    /// Sampled outcomes.
    pub counts: MeasurementCounts,
}

/// Everything drawn for the current Bell state. Replaced wholesale on every
/// transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Views {
    /// State these views show.
    pub selector: BellStateSelector,
    /// Circuit that prepared it.
    pub circuit: Circuit,
    /// Rendered circuit diagram.
    pub diagram: Image,
    /// Simulation output behind every view.
    pub artifacts: Artifacts,
    /// Statevector grid.
    pub state_grid: AmplitudeGrid,
    /// Unitary grid.
    pub unitary_grid: AmplitudeGrid,
    /// One bar per basis label.
    pub bars: Vec<HistogramBar>,
    /// Rendered histogram.
    pub histogram: Image,
    /// Q-sphere markers.
    pub sphere: Vec<SpherePoint>,
    /// Rendered q-sphere listing.
    pub qsphere: Image,
}

impl Views {
    /// Maps artifacts to drawable primitives. Images go through `assets`
    /// when one is configured.
    pub fn map(
        selector: BellStateSelector,
        circuit: Circuit,
        artifacts: Artifacts,
        config: &ViewConfig,
        assets: Option<&AssetStore>,
    ) -> Result<Self> {
        let state_grid = map_vector(&artifacts.state)?;
        let unitary_grid = map_matrix(&artifacts.unitary)?;
        let bars = histogram_bars(&artifacts.counts, artifacts.state.num_qubits());
        let sphere = qsphere_points(&artifacts.state, config.sphere_tolerance);

        let through_assets = |content: PanelContent, image: Image| -> Result<Image> {
            match assets {
                Some(store) => store.store(content, selector, &image),
                None => Ok(image),
            }
        };
        let diagram = through_assets(PanelContent::CircuitDiagram, Image::from_text(&circuit.to_string()))?;
        let histogram = through_assets(PanelContent::Histogram, plot_histogram(&bars))?;
        let qsphere = through_assets(PanelContent::QSphere, plot_qsphere(&sphere))?;

        Ok(Self {
            selector,
            circuit,
            diagram,
            artifacts,
            state_grid,
            unitary_grid,
            bars,
            histogram,
            sphere,
            qsphere,
        })
    }

    /// Line shown above the panels.
    pub fn caption(&self) -> String {
        format!(
            "Bell state {} ({})  ·  {} shots  ·  ←/→ to cycle, q to quit",
            self.selector,
            self.selector.name(),
            self.artifacts.counts.total()
        )
    }

    /// Panel size needed to show `content`, padding included.
    pub fn panel_size(&self, content: PanelContent, cell_pitch: u32) -> (u32, u32) {
        let (w, h) = match content {
            PanelContent::CircuitDiagram => (self.diagram.width, self.diagram.height),
            PanelContent::StateGrid => self.state_grid.extent(cell_pitch),
            PanelContent::UnitaryGrid => self.unitary_grid.extent(cell_pitch),
            PanelContent::Histogram => (self.histogram.width, self.histogram.height),
            PanelContent::QSphere => (self.qsphere.width, self.qsphere.height),
        };
        (w + PANEL_PADDING, h + PANEL_PADDING)
    }
}
