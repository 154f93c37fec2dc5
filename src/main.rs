use eframe::{App, Frame, CreationContext, egui};
use egui::{Align, Layout, RichText};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod backend;
mod config;
mod error;
mod form;
mod list;
mod models;
mod store;
use backend::Backend;
use config::Config;
use list::ListAction;
use store::WorkoutStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().map_err(|e| {
        error!("Error loading config: {}", e);
        e
    })?;
    info!("using {:?} backend", config.backend);
    let backend = backend::from_config(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "My Fitness Tracker",
        options,
        Box::new(|cc| Ok(Box::new(FitnessApp::new(cc, backend)))),
    )?;
    Ok(())
}

struct FitnessApp {
    store: WorkoutStore<Box<dyn Backend>>,
    draft: String,
}

impl FitnessApp {
    fn new(cc: &CreationContext, backend: Box<dyn Backend>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(20.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(20.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(32.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        let mut store = WorkoutStore::new(backend);
        store.load();
        FitnessApp {
            store,
            draft: String::new(),
        }
    }
}

impl App for FitnessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::top_down_justified(Align::Min), |ui| {
                ui.add_space(10.0);
                ui.label(RichText::new("My Fitness Tracker").heading().strong());
                ui.add_space(10.0);

                if let Some(name) = form::show_input_form(ui, &mut self.draft) {
                    self.store.add(&name);
                }

                ui.add_space(20.0);

                match list::show_workout_list(ui, self.store.entries()) {
                    Some(ListAction::Remove(id)) => self.store.remove(&id),
                    Some(ListAction::Reorder { from, to }) => self.store.reorder(from, to),
                    None => {}
                }
            });
        });
    }
}
