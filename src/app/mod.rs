//! The interactive explorer: configuration, input, the state-cycle
//! controller and the surfaces it draws on.

pub mod assets;
pub mod config;
pub mod context;
pub mod controller;
pub mod input;
pub mod surface;
pub mod views;

pub use assets::AssetStore;
pub use config::Config;
pub use context::AppContext;
pub use controller::{CountsPolicy, StateCycleController};
pub use input::{Command, map_event, map_key};
pub use surface::{Canvas, Frame, Surface, TerminalSurface};
pub use views::{ViewConfig, Views};

use std::time::Duration;

use crossterm::event::{self, Event};
use tracing::{debug, info, warn};

use crate::core::{Result, Stage};
use crate::simulation::{Simulator, StateSimulationAdapter};

/// Event-loop tick: 60 Hz.
pub const TICK: Duration = Duration::from_micros(16_667);

/// Where terminal events come from.
pub trait EventSource {
    /// Waits up to `timeout` for the next event.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Reads events from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Builds the simulator, the optional asset store and the initial views
/// described by `config`.
///
/// Every failure carries the stage it belongs to; the asset directory is part
/// of view mapping.
pub fn prepare(config: &Config) -> Result<StateCycleController<Simulator>> {
    let simulator = Simulator::with_config(config.simulator_config());
    info!(seed = simulator.seed(), shots = config.shots, "measurement sampler seeded");

    let assets = config
        .asset_dir
        .as_deref()
        .map(|dir| AssetStore::open(dir))
        .transpose()
        .map_err(|e| e.in_stage(Stage::Map))?;
    let context = AppContext::new(config.view_config(), assets);
    StateCycleController::new(simulator, context, config.initial, config.counts_policy())
}

/// Combines the loop outcome with the result of restoring the terminal.
/// The loop's own error wins; a restore failure is only reported when the
/// loop ended cleanly.
pub fn settle(outcome: Result<()>, restored: Result<()>) -> Result<()> {
    match (outcome, restored) {
        (Err(err), Err(restore_err)) => {
            warn!(%restore_err, "terminal restore failed");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), restored) => restored.map_err(|e| e.in_stage(Stage::Render)),
    }
}

/// Runs until the user quits or a transition fails.
///
/// A frame is presented at startup, after every transition and after a
/// terminal resize; idle ticks draw nothing.
pub fn run_loop<S, F, E>(controller: &mut StateCycleController<S>, surface: &mut F, events: &mut E) -> Result<()>
where
    S: StateSimulationAdapter,
    F: Surface,
    E: EventSource,
{
    let mut dirty = true;
    loop {
        if dirty {
            let frame = Frame::compose(
                controller.views(),
                &controller.context().layout,
                controller.context().view_config.cell_pitch,
            );
            surface.present(&frame).map_err(|e| e.in_stage(Stage::Render))?;
            dirty = false;
        }

        let Some(event) = events.next_event(TICK).map_err(|e| e.in_stage(Stage::Render))? else {
            continue;
        };
        if let Event::Resize(w, h) = event {
            debug!(w, h, "terminal resized");
            dirty = true;
            continue;
        }
        if let Some(command) = map_event(&event) {
            debug!(?command, "command");
            if command == Command::Quit {
                info!(recomputes = controller.recompute_count(), "quit requested");
                return Ok(());
            }
            dirty |= controller.advance(command.delta())?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BellError, BellStateSelector};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;
    use std::ffi::OsStr;

    struct Scripted(VecDeque<Event>);

    impl EventSource for Scripted {
        fn next_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Ok(self.0.pop_front())
        }
    }

    #[derive(Default)]
    struct Counting {
        presented: usize,
        captions: Vec<String>,
    }

    impl Surface for Counting {
        fn present(&mut self, frame: &Frame) -> Result<()> {
            self.presented += 1;
            self.captions.push(frame.caption.clone());
            Ok(())
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn loop_redraws_only_on_change_and_stops_on_quit() -> Result<()> {
        let context = AppContext::new(ViewConfig { shots: 8, ..ViewConfig::default() }, None);
        let mut controller =
            StateCycleController::new(Simulator::with_seed(2), context, BellStateSelector::PhiPlus, CountsPolicy::Resample)?;
        let mut surface = Counting::default();
        let mut events = Scripted(VecDeque::from(vec![
            key(KeyCode::Right),
            key(KeyCode::Char('x')),
            Event::Resize(80, 24),
            key(KeyCode::Left),
            key(KeyCode::Char('q')),
        ]));

        run_loop(&mut controller, &mut surface, &mut events)?;

        assert_eq!(surface.presented, 4);
        assert!(surface.captions[1].contains("Φ-"));
        assert_eq!(controller.selector(), BellStateSelector::PhiPlus);
        assert_eq!(controller.recompute_count(), 3);
        Ok(())
    }

    struct Failing;

    impl EventSource for Failing {
        fn next_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Err(BellError::Io(std::io::Error::other("tty gone")))
        }
    }

    #[test]
    fn event_source_failure_is_a_render_error() -> Result<()> {
        let context = AppContext::new(ViewConfig { shots: 8, ..ViewConfig::default() }, None);
        let mut controller =
            StateCycleController::new(Simulator::with_seed(2), context, BellStateSelector::PhiPlus, CountsPolicy::Resample)?;
        let err = run_loop(&mut controller, &mut Counting::default(), &mut Failing).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Render));
        assert_eq!(err.to_string(), "render stage failed: I/O error: tty gone");
        Ok(())
    }

    #[test]
    fn prepare_builds_initial_views() -> Result<()> {
        let config = Config::try_parse_args(["bellview", "--initial", "psi-plus", "--shots", "10", "--seed", "3"])
            .expect("flags parse");
        let controller = prepare(&config)?;
        assert_eq!(controller.selector(), BellStateSelector::PsiPlus);
        assert_eq!(controller.views().artifacts.counts.total(), 10);
        Ok(())
    }

    #[test]
    fn unusable_asset_directory_is_a_map_error() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let file = tmp.path().join("plain-file");
        std::fs::write(&file, "not a directory")?;
        let dir = file.join("sub");
        let config = Config::try_parse_args([OsStr::new("bellview"), OsStr::new("--asset-dir"), dir.as_os_str()])
        .expect("flags parse");
        let err = prepare(&config).err().expect("asset directory cannot be created");
        assert_eq!(err.stage(), Some(Stage::Map));
        assert!(err.to_string().starts_with("map stage failed: asset load failure"));
        Ok(())
    }

    #[test]
    fn loop_error_wins_over_restore_error() {
        let loop_err = BellError::simulation("backend lost").in_stage(Stage::Simulate);
        let restore_err = BellError::Io(std::io::Error::other("tty gone"));
        let err = settle(Err(loop_err), Err(restore_err)).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Simulate));

        let err = settle(Ok(()), Err(BellError::Io(std::io::Error::other("tty gone")))).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Render));
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
