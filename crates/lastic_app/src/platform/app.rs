use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::anyhow;
use lastic_core::{update, AppState, AppViewModel, Msg};
use lastic_logging::{lastic_debug, lastic_info};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence::{default_settings_path, load_settings, Settings};
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::Both);

    let settings_path = default_settings_path();
    let settings = load_settings(&settings_path);
    lastic_info!(
        "Starting {} (tool={:?})",
        ui::constants::WINDOW_TITLE,
        settings.engine_config().program
    );

    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        ui::layout::native_options(),
        Box::new(move |cc| create_app(cc, settings, settings_path)),
    )
    .map_err(|err| anyhow!("UI event loop failed: {err}"))
}

type CreateError = Box<dyn std::error::Error + Send + Sync>;

fn create_app(
    cc: &eframe::CreationContext<'_>,
    settings: Settings,
    settings_path: PathBuf,
) -> Result<Box<dyn eframe::App>, CreateError> {
    Ok(Box::new(LasticApp::new(cc, settings, settings_path)?))
}

struct LasticApp {
    state: AppState,
    view: AppViewModel,
    url_buffer: String,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
}

impl LasticApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_path: PathBuf,
    ) -> std::io::Result<Self> {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let preferred = settings.preferred_quality();
        let effects = EffectRunner::new(
            settings.engine_config(),
            msg_tx.clone(),
            cc.egui_ctx.clone(),
            settings,
            settings_path,
        )?;

        let state = AppState::default();
        let view = state.view();
        let mut app = Self {
            state,
            view,
            url_buffer: String::new(),
            msg_tx,
            msg_rx,
            effects,
        };
        if let Some(quality) = preferred {
            app.dispatch_msg(Msg::RestorePreferredQuality(quality));
        }
        Ok(app)
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg, chrono::Local::now().time());
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        if !effects.is_empty() {
            lastic_debug!("Running {} effect(s)", effects.len());
            self.effects.enqueue(effects);
        }
    }
}

impl eframe::App for LasticApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        let ui_msgs = ui::render::render(ctx, &self.view, &mut self.url_buffer);
        let mut changed = false;
        for msg in ui_msgs {
            if self.msg_tx.send(msg).is_err() {
                break;
            }
            changed = true;
        }
        if changed {
            self.process_pending_messages();
            ctx.request_repaint();
        }
    }
}
