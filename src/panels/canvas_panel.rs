use crate::input::{InputHandler, route_event};
use crate::pad::DraftPad;

/// Alpha of the dimmed backdrop between the page and the pad's ink.
const BACKDROP_ALPHA: u8 = 153;

/// Full-window drawing surface laid over the page: sizes the canvas, feeds it
/// input and paints the last rendered frame.
pub fn canvas_panel(pad: &mut DraftPad, input: &mut InputHandler, ctx: &egui::Context) {
    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("draft_pad_canvas"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(screen.size(), egui::Sense::click_and_drag());
            let rect = response.rect;

            pad.resize(rect.size(), ctx.pixels_per_point());
            input.set_canvas_rect(rect);

            for event in input.process_input(ctx, response.hovered()) {
                route_event(pad, &event);
            }

            pad.redraw_if_pending();
            painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(BACKDROP_ALPHA));
            pad.renderer().paint(&painter, rect);
        });
}
