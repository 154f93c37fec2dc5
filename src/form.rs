use eframe::egui::{self, Id, Key, RichText, TextEdit, Ui};

const NAME_FIELD: &str = "workout-name";

/// Draws the name field and `Add` button. Returns the submitted name, leaving
/// the draft cleared.
pub fn show_input_form(ui: &mut Ui, draft: &mut String) -> Option<String> {
    let mut submitted = None;

    ui.vertical(|ui| {
        let field = ui.add(
            TextEdit::singleline(draft)
                .id(Id::new(NAME_FIELD))
                .hint_text("Workout name")
                .desired_width(f32::INFINITY),
        );
        let pressed_enter = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        let clicked = ui
            .add_sized(
                [ui.available_width(), 32.0],
                egui::Button::new(RichText::new("Add").strong()),
            )
            .clicked();

        if clicked || pressed_enter {
            submitted = Some(take_draft(draft));
        }
    });

    submitted
}

fn take_draft(draft: &mut String) -> String {
    std::mem::take(draft)
}
