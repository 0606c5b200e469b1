//! Cyclic selection of the Bell state and the recomputation it triggers.

use tracing::{debug, debug_span, info};

use super::context::AppContext;
use super::input::Command;
use super::views::{Artifacts, Views};
use crate::circuits::{Circuit, build_bell_circuit};
use crate::core::{BellError, BellStateSelector, NUM_QUBITS, Result, Stage};
use crate::simulation::{MeasurementCounts, StateSimulationAdapter};
use crate::visual::PanelContent;

/// When to draw fresh measurement samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountsPolicy {
    /// Sample again every time a state is shown.
    #[default]
    Resample,
    /// Sample once per Bell state and reuse the counts on later visits.
    CachePerSelector,
}

const ALL_PANELS: [PanelContent; 5] = [
    PanelContent::CircuitDiagram,
    PanelContent::StateGrid,
    PanelContent::UnitaryGrid,
    PanelContent::Histogram,
    PanelContent::QSphere,
];

/// Owns the current selector and keeps every view in step with it.
///
/// A transition runs three steps in order: build the circuit, recompute all
/// views from it, resize and re-arrange the panels. The first failure aborts
/// the transition and the selector keeps its previous value.
#[derive(Debug)]
pub struct StateCycleController<S: StateSimulationAdapter> {
    selector: BellStateSelector,
    adapter: S,
    context: AppContext,
    policy: CountsPolicy,
    counts_cache: [Option<MeasurementCounts>; BellStateSelector::COUNT],
    views: Views,
    recomputes: u64,
}

impl<S: StateSimulationAdapter> StateCycleController<S> {
    /// Builds the initial views for `initial`.
    pub fn new(mut adapter: S, mut context: AppContext, initial: BellStateSelector, policy: CountsPolicy) -> Result<Self> {
        let mut counts_cache: [Option<MeasurementCounts>; BellStateSelector::COUNT] = Default::default();
        let views = Self::recompute(&mut adapter, &mut context, policy, &mut counts_cache, initial)?;
        info!(selector = initial.name(), ?policy, "explorer ready");
        Ok(Self {
            selector: initial,
            adapter,
            context,
            policy,
            counts_cache,
            views,
            recomputes: 1,
        })
    }

    /// Moves the selector by `delta` (mod 4). Returns whether the views were
    /// recomputed; a zero net move touches nothing.
    pub fn advance(&mut self, delta: i32) -> Result<bool> {
        if delta == 0 {
            return Ok(false);
        }
        let target = self.selector.offset(delta);
        if target == self.selector {
            debug!(delta, "net move is zero, nothing to do");
            return Ok(false);
        }
        info!(from = self.selector.name(), to = target.name(), "switching Bell state");
        self.views = Self::recompute(
            &mut self.adapter,
            &mut self.context,
            self.policy,
            &mut self.counts_cache,
            target,
        )?;
        self.selector = target;
        self.recomputes += 1;
        Ok(true)
    }

    /// `advance(1)`.
    pub fn next(&mut self) -> Result<bool> {
        self.advance(1)
    }

    /// `advance(-1)`.
    pub fn previous(&mut self) -> Result<bool> {
        self.advance(-1)
    }

    /// Applies an input command. Returns `Ok(false)` when the user asked to
    /// quit.
    pub fn apply(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Quit => Ok(false),
            other => {
                self.advance(other.delta())?;
                Ok(true)
            }
        }
    }

    /// Bell state currently shown.
    pub fn selector(&self) -> BellStateSelector {
        self.selector
    }

    /// Views for the current state.
    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Settings, layout and assets.
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// The simulation backend.
    pub fn adapter(&self) -> &S {
        &self.adapter
    }

    /// Number of full recomputations so far, the initial one included.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    fn recompute(
        adapter: &mut S,
        context: &mut AppContext,
        policy: CountsPolicy,
        counts_cache: &mut [Option<MeasurementCounts>; BellStateSelector::COUNT],
        selector: BellStateSelector,
    ) -> Result<Views> {
        let _span = debug_span!("recompute", selector = selector.name()).entered();

        let circuit = Self::build(selector).map_err(|e| e.in_stage(Stage::CircuitBuild))?;

        let artifacts = Self::simulate(adapter, &circuit, context.view_config.shots, policy, counts_cache, selector)
            .map_err(|e| e.in_stage(Stage::Simulate))?;

        let views = Views::map(selector, circuit, artifacts, &context.view_config, context.assets.as_ref())
            .map_err(|e| e.in_stage(Stage::Map))?;

        let pitch = context.view_config.cell_pitch;
        for content in ALL_PANELS {
            let (w, h) = views.panel_size(content, pitch);
            context.layout.resize(content, w, h).map_err(|e| e.in_stage(Stage::Render))?;
        }
        context.layout.arrange();
        debug!(extent = ?context.layout.extent(), "layout arranged");

        Ok(views)
    }

    fn build(selector: BellStateSelector) -> Result<Circuit> {
        let circuit = build_bell_circuit(selector);
        if circuit.num_qubits() != NUM_QUBITS {
            return Err(BellError::invalid(format!(
                "Bell circuit for {} acts on {} qubits",
                selector,
                circuit.num_qubits()
            )));
        }
        debug!("circuit built:\n{}", circuit);
        Ok(circuit)
    }

    fn simulate(
        adapter: &mut S,
        circuit: &Circuit,
        shots: u64,
        policy: CountsPolicy,
        counts_cache: &mut [Option<MeasurementCounts>; BellStateSelector::COUNT],
        selector: BellStateSelector,
    ) -> Result<Artifacts> {
        let state = adapter.simulate_statevector(circuit)?;
        let unitary = adapter.simulate_unitary(circuit)?;
        let slot = selector.ordinal();
        let counts = match policy {
            CountsPolicy::Resample => adapter.simulate_measurements(circuit, shots)?,
            CountsPolicy::CachePerSelector => {
                if counts_cache[slot].is_none() {
                    counts_cache[slot] = Some(adapter.simulate_measurements(circuit, shots)?);
                } else {
                    debug!("reusing cached counts");
                }
                counts_cache[slot].clone().unwrap_or_default()
            }
        };
        Ok(Artifacts { state, unitary, counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::views::ViewConfig;
    use crate::core::{StateVector, UnitaryMatrix};
    use crate::simulation::Simulator;

    fn controller(initial: BellStateSelector, policy: CountsPolicy) -> StateCycleController<Simulator> {
        let context = AppContext::new(ViewConfig { shots: 32, ..ViewConfig::default() }, None);
        StateCycleController::new(Simulator::with_seed(11), context, initial, policy).expect("initial views")
    }

    #[test]
    fn next_and_previous_wrap() -> Result<()> {
        let mut c = controller(BellStateSelector::PsiMinus, CountsPolicy::Resample);
        assert!(c.next()?);
        assert_eq!(c.selector(), BellStateSelector::PhiPlus);
        assert!(c.previous()?);
        assert_eq!(c.selector(), BellStateSelector::PsiMinus);
        assert_eq!(c.recompute_count(), 3);
        Ok(())
    }

    #[test]
    fn full_turn_does_not_recompute() -> Result<()> {
        let mut c = controller(BellStateSelector::PhiPlus, CountsPolicy::Resample);
        assert!(!c.advance(0)?);
        assert!(!c.advance(4)?);
        assert!(!c.advance(-8)?);
        assert_eq!(c.recompute_count(), 1);
        Ok(())
    }

    #[test]
    fn apply_quits_and_moves() -> Result<()> {
        let mut c = controller(BellStateSelector::PhiPlus, CountsPolicy::Resample);
        assert!(c.apply(Command::Next)?);
        assert_eq!(c.selector(), BellStateSelector::PhiMinus);
        assert!(!c.apply(Command::Quit)?);
        assert_eq!(c.selector(), BellStateSelector::PhiMinus);
        Ok(())
    }

    #[test]
    fn views_follow_the_selector() -> Result<()> {
        let mut c = controller(BellStateSelector::PhiPlus, CountsPolicy::Resample);
        c.advance(2)?;
        let views = c.views();
        assert_eq!(views.selector, BellStateSelector::PsiPlus);
        assert_eq!(views.artifacts.counts.get("00"), 0);
        assert_eq!(views.artifacts.counts.total(), 32);
        Ok(())
    }

    #[test]
    fn panels_are_sized_and_placed() {
        let c = controller(BellStateSelector::PhiPlus, CountsPolicy::Resample);
        let layout = &c.context().layout;
        let circuit = layout.panel(PanelContent::CircuitDiagram).expect("circuit panel");
        let state = layout.panel(PanelContent::StateGrid).expect("state panel");
        assert!(circuit.width > 0 && circuit.height > 0);
        assert!(state.y >= circuit.bottom());
    }

    #[test]
    fn cached_counts_are_reused() -> Result<()> {
        let mut c = controller(BellStateSelector::PhiPlus, CountsPolicy::CachePerSelector);
        let first = c.views().artifacts.counts.clone();
        c.next()?;
        c.previous()?;
        assert_eq!(c.views().artifacts.counts, first);
        Ok(())
    }

    #[derive(Debug)]
    struct Broken;

    impl StateSimulationAdapter for Broken {
        fn simulate_statevector(&self, _: &Circuit) -> Result<StateVector> {
            Err(BellError::simulation("backend unavailable"))
        }
        fn simulate_unitary(&self, _: &Circuit) -> Result<UnitaryMatrix> {
            Err(BellError::simulation("backend unavailable"))
        }
        fn simulate_measurements(&mut self, _: &Circuit, _: u64) -> Result<MeasurementCounts> {
            Err(BellError::simulation("backend unavailable"))
        }
    }

    #[test]
    fn adapter_failure_is_tagged_with_simulate_stage() {
        let context = AppContext::new(ViewConfig::default(), None);
        let err = StateCycleController::new(Broken, context, BellStateSelector::PhiPlus, CountsPolicy::Resample)
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Simulate));
        assert!(err.to_string().starts_with("simulate stage failed"));
    }
}
