//! Bridges core effects to the engine and engine events back to messages.

use meow_logging::meow_info;
use meowdown_core::{Effect, Msg};
use meowdown_engine::{EngineEvent, EngineHandle};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl Default for EffectRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRunner {
    pub fn new() -> Self {
        Self {
            engine: EngineHandle::new(),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::EnsureDependencies => {
                    meow_info!("requesting dependency bootstrap");
                    self.engine.ensure_dependencies();
                }
                Effect::RunDownload {
                    index,
                    total,
                    args,
                    destination,
                } => {
                    meow_info!("enqueue download {}/{}", index + 1, total);
                    self.engine.run_download(index, args, destination);
                }
                Effect::MergeTracks {
                    directory,
                    extension,
                } => {
                    self.engine.merge_tracks(directory, extension);
                }
            }
        }
    }

    /// Drains pending engine events, mapped into core messages. Called once
    /// per frame by the GUI loop.
    pub fn poll(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BootstrapProgress { fraction, message } => {
            Msg::BootstrapProgress { fraction, message }
        }
        EngineEvent::BootstrapFinished { result } => Msg::DependenciesReady { result },
        EngineEvent::JobStarted { index } => Msg::JobStarted { index },
        EngineEvent::JobOutput { line } => Msg::JobLine(line),
        EngineEvent::JobFinished { success } => Msg::JobFinished { success },
        EngineEvent::MergeFinished { result } => Msg::MergeFinished {
            result: result.map(|path| path.map(|p| p.display().to_string())),
        },
    }
}
