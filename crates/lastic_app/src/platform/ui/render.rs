use egui::{Button, Color32, ComboBox, ProgressBar, RichText, ScrollArea, TextEdit};
use lastic_core::{AppViewModel, Msg};

use super::constants::*;

/// Draws one frame from the view model and returns the messages the user triggered.
pub fn render(ctx: &egui::Context, view: &AppViewModel, url_buffer: &mut String) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(WINDOW_TITLE)
                    .size(HEADING_SIZE)
                    .strong()
                    .color(HEADING_COLOR),
            );
        });
        ui.add_space(PANEL_SPACING);

        let url_edit = ui.add(
            TextEdit::singleline(url_buffer)
                .hint_text(URL_HINT)
                .desired_width(f32::INFINITY),
        );
        if url_edit.changed() {
            msgs.push(Msg::UrlChanged(url_buffer.clone()));
        }
        if url_edit.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
            msgs.push(Msg::FetchClicked);
        }
        ui.add_space(PANEL_SPACING);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(view.fetch_enabled, Button::new(BUTTON_FETCH))
                .clicked()
            {
                msgs.push(Msg::FetchClicked);
            }

            ui.add_enabled_ui(!view.qualities.is_empty() && view.fetch_enabled, |ui| {
                ComboBox::from_id_salt("quality_selector")
                    .selected_text(view.quality_text.as_str())
                    .width(QUALITY_WIDTH)
                    .show_ui(ui, |ui| {
                        for &quality in &view.qualities {
                            let selected = view.selected_quality == Some(quality);
                            if ui.selectable_label(selected, quality.label()).clicked() {
                                msgs.push(Msg::QualitySelected(quality));
                            }
                        }
                    });
            });

            if ui
                .add_enabled(view.download_enabled, Button::new(BUTTON_DOWNLOAD))
                .clicked()
            {
                msgs.push(Msg::DownloadClicked);
            }

            if view.cancel_visible {
                let cancel = Button::new(RichText::new(BUTTON_CANCEL).color(Color32::WHITE))
                    .fill(CANCEL_COLOR);
                if ui.add(cancel).clicked() {
                    msgs.push(Msg::CancelClicked);
                }
            }
        });
        ui.add_space(PANEL_SPACING);

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(view.status.as_str())
                    .size(STATUS_SIZE)
                    .color(STATUS_COLOR),
            );
        });
        ui.add(ProgressBar::new(view.progress_fraction()).desired_height(PROGRESS_HEIGHT));
        ui.add_space(PANEL_SPACING);

        ScrollArea::vertical()
            .max_height(LOG_HEIGHT)
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &view.log_lines {
                    ui.label(
                        RichText::new(line.as_str())
                            .size(LOG_SIZE)
                            .color(LOG_COLOR),
                    );
                }
            });
    });

    msgs
}
