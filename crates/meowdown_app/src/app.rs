use std::time::Duration;

use eframe::egui;
use meowdown_core::{update, AppState, Msg};

use crate::effects::EffectRunner;
use crate::form::FormState;
use crate::{persistence, ui};

pub struct MeowDownApp {
    state: AppState,
    form: FormState,
    effects: EffectRunner,
}

impl Default for MeowDownApp {
    fn default() -> Self {
        Self::new()
    }
}

impl MeowDownApp {
    pub fn new() -> Self {
        let mut form = FormState::default();
        form.destination = meowdown_engine::default_download_dir()
            .display()
            .to_string();
        if let Some((destination, options)) = persistence::load_settings() {
            if !destination.is_empty() {
                form.destination = destination;
            }
            form.apply_options(&options);
        }

        Self {
            state: AppState::new(),
            form,
            effects: EffectRunner::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.enqueue(effects);
    }
}

impl eframe::App for MeowDownApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for msg in self.effects.poll() {
            self.dispatch(msg);
        }

        let view = self.state.view();
        let msgs = egui::CentralPanel::default()
            .show(ctx, |ui| ui::render(ui, &mut self.form, &view))
            .inner;
        for msg in msgs {
            self.dispatch(msg);
        }

        // Subprocess output arrives between frames; keep repainting while a
        // job is running so the bar tracks it.
        if view.busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        persistence::save_settings(&self.form.destination, &self.form.to_options());
    }
}
