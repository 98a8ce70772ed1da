use eframe::egui;

/// Square icon button used by the draft pad toolbar
pub struct ToolButton {
    pub icon: &'static str,
    pub tooltip: String,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, tooltip: impl Into<String>, selected: bool) -> Self {
        Self {
            icon,
            tooltip: tooltip.into(),
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(28.0, 28.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(37, 99, 235)
            } else if response.hovered() {
                egui::Color32::from_gray(229)
            } else {
                egui::Color32::TRANSPARENT
            };
            ui.painter().rect_filled(rect, 6.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgb(0x11, 0x18, 0x27)
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(16.0),
                text_color,
            );
        }

        response.on_hover_text(self.tooltip.as_str())
    }
}

/// Round colour swatch; ringed when it is the current pen colour
pub fn color_swatch(ui: &mut egui::Ui, color: egui::Color32, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(22.0, 22.0), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let radius = rect.width() / 2.0 - 3.0;
        ui.painter().circle_filled(rect.center(), radius, color);
        if selected {
            ui.painter().circle_stroke(
                rect.center(),
                radius + 2.0,
                egui::Stroke::new(2.0, egui::Color32::from_rgb(37, 99, 235)),
            );
        }
    }
    response
}
