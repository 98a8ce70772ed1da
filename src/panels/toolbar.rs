use crate::components::tool_button::{ToolButton, color_swatch};
use crate::pad::DraftPad;
use crate::stroke::StrokeMode;
use crate::tools::{AxisLock, ShapeTool, ToolMode};

/// Floating, draggable toolbar of the draft pad.
pub fn toolbar(pad: &mut DraftPad, ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("draft_pad_toolbar"))
        .movable(true)
        .order(egui::Order::Foreground)
        .default_pos(egui::pos2(24.0, 24.0))
        .show(ctx, |ui| {
            egui::Frame::window(ui.style()).show(ui, |ui| {
                tool_row(pad, ui);
                ui.separator();
                pen_row(pad, ui);
                ui.separator();
                action_row(pad, ui);
                history_grid(pad, ui);
            });
        });
}

fn tool_row(pad: &mut DraftPad, ui: &mut egui::Ui) {
    let mode = pad.tools().mode();
    ui.horizontal(|ui| {
        if ToolButton::new("✏", "Pen", mode == ToolMode::Draw).show(ui).clicked() {
            pad.select_ink(StrokeMode::Draw);
        }
        if ToolButton::new("⌫", "Eraser", mode == ToolMode::Erase).show(ui).clicked() {
            pad.select_ink(StrokeMode::Erase);
        }
        ui.separator();
        for tool in ShapeTool::ALL {
            let tooltip = format!("{} ({:?})", tool.name(), tool.shortcut());
            let selected = mode == ToolMode::Shape(tool);
            if ToolButton::new(tool.icon(), tooltip, selected).show(ui).clicked() {
                log::info!("Tool selected from UI: {}", tool.name());
                pad.select_shape_tool(tool);
            }
        }
    });
}

fn pen_row(pad: &mut DraftPad, ui: &mut egui::Ui) {
    let palette = pad.config().palette.clone();
    let pen_widths = pad.config().pen_widths.clone();
    let eraser_widths = pad.config().eraser_widths.clone();

    ui.horizontal(|ui| {
        for color in palette {
            let selected = pad.tools().pen_color() == color && pad.tools().mode() == ToolMode::Draw;
            if color_swatch(ui, color, selected).clicked() {
                pad.set_pen_color(color);
            }
        }
        ui.separator();

        for width in pen_widths {
            let selected = pad.tools().pen_width() == width;
            if ui.selectable_label(selected, format!("{width}")).clicked() {
                pad.set_pen_width(width);
            }
        }
        ui.separator();
        for width in eraser_widths {
            let selected = pad.tools().ink() == StrokeMode::Erase && pad.tools().eraser_width() == width;
            if ui.selectable_label(selected, format!("E{width}")).clicked() {
                pad.set_eraser_width(width);
            }
        }
        ui.separator();

        ui.label("Lock:");
        for lock in [AxisLock::None, AxisLock::Horizontal, AxisLock::Vertical] {
            if ui
                .selectable_label(pad.tools().axis_lock() == lock, lock.label())
                .clicked()
            {
                pad.set_axis_lock(lock);
            }
        }
    });
}

fn action_row(pad: &mut DraftPad, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.add_enabled(pad.can_undo(), egui::Button::new("Undo")).clicked() {
            pad.undo();
        }
        if ui.add_enabled(pad.can_redo(), egui::Button::new("Redo")).clicked() {
            pad.redo();
        }
        if ui.button("Clear").clicked() {
            pad.clear();
        }

        if pad.scene().confirming().is_some() {
            ui.separator();
            if ui.button("✔ Confirm").clicked() {
                pad.finish();
            }
            if ui.button("✖ Cancel").clicked() {
                pad.cancel();
            }
        }

        ui.separator();
        if ui.button("Close").clicked() {
            pad.request_close();
        }
    });
}

fn history_grid(pad: &DraftPad, ui: &mut egui::Ui) {
    let history = pad.history();
    egui::CollapsingHeader::new(format!(
        "History ({} / {})",
        history.undo_stack().len(),
        history.redo_stack().len()
    ))
    .id_salt("draft_pad_history")
    .show(ui, |ui| {
        ui.label(format!("State: {}", pad.state().state_name()));
        egui::Grid::new("command_history_grid")
            .num_columns(2)
            .spacing([40.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Undo Stack");
                ui.strong("Redo Stack");
                ui.end_row();

                let undo_stack = history.undo_stack();
                let redo_stack = history.redo_stack();
                for i in 0..undo_stack.len().max(redo_stack.len()) {
                    ui.label(undo_stack.get(i).map(|c| c.label()).unwrap_or_default());
                    ui.label(redo_stack.get(i).map(|c| c.label()).unwrap_or_default());
                    ui.end_row();
                }
            });
    });
}
