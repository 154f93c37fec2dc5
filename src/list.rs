use eframe::egui::{self, Align, Color32, Id, Layout, RichText, ScrollArea, Ui};

use crate::models::WorkoutEntry;

/// Drag payload: the id of the workout being dragged.
struct DraggedWorkout(String);

#[derive(Debug, PartialEq)]
pub enum ListAction {
    Remove(String),
    Reorder { from: usize, to: usize },
}

/// Turns a finished drag into `(from, to)` indices. Drops outside the list,
/// onto the dragged row itself, or onto an unknown id resolve to nothing.
pub fn resolve_drop(
    entries: &[WorkoutEntry],
    source: &str,
    destination: Option<&str>,
) -> Option<(usize, usize)> {
    let destination = destination?;
    if source == destination {
        return None;
    }
    let from = entries.iter().position(|w| w.id == source)?;
    let to = entries.iter().position(|w| w.id == destination)?;
    Some((from, to))
}

pub fn show_workout_list(ui: &mut Ui, entries: &[WorkoutEntry]) -> Option<ListAction> {
    let mut action = None;

    if entries.is_empty() {
        ui.label(RichText::new("No workouts yet.").size(20.0).color(Color32::GRAY));
        return None;
    }

    ScrollArea::vertical().show(ui, |ui| {
        ui.set_width(ui.available_width());
        for workout in entries {
            let row = egui::Frame::group(ui.style())
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.dnd_drag_source(
                            Id::new(("workout-drag", &workout.id)),
                            DraggedWorkout(workout.id.clone()),
                            |ui| {
                                ui.label(RichText::new("☰").size(24.0));
                            },
                        );
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&workout.name).size(24.0).strong());
                            ui.label(
                                RichText::new(workout.display_date())
                                    .size(16.0)
                                    .color(Color32::GRAY),
                            );
                        });
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui
                                .button(RichText::new("Remove").color(Color32::RED))
                                .clicked()
                            {
                                action = Some(ListAction::Remove(workout.id.clone()));
                            }
                        });
                    });
                })
                .response;

            if row.dnd_hover_payload::<DraggedWorkout>().is_some() {
                let stroke = ui.visuals().selection.stroke;
                ui.painter().hline(row.rect.x_range(), row.rect.top(), stroke);
            }
            if let Some(dragged) = row.dnd_release_payload::<DraggedWorkout>() {
                if let Some((from, to)) = resolve_drop(entries, &dragged.0, Some(&workout.id)) {
                    action = Some(ListAction::Reorder { from, to });
                }
            }
        }
    });

    action
}
