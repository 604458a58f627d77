use egui::Slider;

use crate::PaintApp;
use crate::demos::DemoKind;
use crate::palette::{ColorChoice, PaletteColor};
use crate::tools::ToolKind;
use crate::widgets::{OverlayWidget, ViewId};

fn param_slider(ui: &mut egui::Ui, label: &str, value: f64, range: std::ops::RangeInclusive<f64>) -> Option<f64> {
    let mut value = value;
    let changed = ui.add(Slider::new(&mut value, range).text(label)).changed();
    changed.then_some(value)
}

fn demo_settings(app: &mut PaintApp, ui: &mut egui::Ui, kind: DemoKind) {
    let params = app.context().controller.demos().params().clone();
    let mut updates: Vec<(&str, f64)> = Vec::new();
    match kind {
        DemoKind::CurveDesigner => {
            if let Some(v) = param_slider(ui, "Speed", params.curve.animation_speed, 0.001..=0.05) {
                updates.push(("animation_speed", v));
            }
            if let Some(v) = param_slider(ui, "Width", params.curve.curve_width, 1.0..=10.0) {
                updates.push(("curve_width", v));
            }
        }
        DemoKind::ShapeMorph => {
            if let Some(v) = param_slider(ui, "Transition", params.morph.transition_speed, 0.005..=0.1) {
                updates.push(("transition_speed", v));
            }
            if let Some(v) = param_slider(ui, "Hue rotation", params.morph.rotation_speed, 0.0..=5.0) {
                updates.push(("rotation_speed", v));
            }
        }
        DemoKind::ParticleEmitter => {
            if let Some(v) = param_slider(ui, "Emit rate", params.particles.emit_rate as f64, 0.0..=20.0) {
                updates.push(("emit_rate", v));
            }
            if let Some(v) = param_slider(ui, "Gravity", params.particles.gravity, 0.0..=0.5) {
                updates.push(("gravity", v));
            }
        }
    }
    for (name, value) in updates {
        app.context_mut().controller.demos_mut().update_param(kind, name, value);
    }
}

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            let status = app.status();

            ui.heading("Tools");
            for tool in ToolKind::ALL {
                let label = format!("{}  {}", tool.shortcut(), tool.label());
                if ui.selectable_label(status.tool == tool, label).clicked() {
                    log::info!("Tool selected from UI: {tool}");
                    app.activate(OverlayWidget::ToolButton(tool));
                }
            }
            ui.separator();

            ui.heading("Color");
            ui.horizontal_wrapped(|ui| {
                for color in PaletteColor::ALL {
                    let selected = status.color.palette() == Some(color);
                    if ui.selectable_label(selected, color.name()).clicked() {
                        app.activate(OverlayWidget::ColorSwatch(color));
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.label("Custom:");
                let mut custom = status.color.resolve();
                let response = egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut custom,
                    egui::color_picker::Alpha::Opaque,
                );
                if response.changed() {
                    let context = app.context_mut();
                    context.controller.set_color(&mut context.model, ColorChoice::Hex(custom));
                    context.sync_view();
                }
            });
            ui.separator();

            ui.heading("Demos");
            for kind in DemoKind::ALL {
                let label = format!("{}  {}", kind.shortcut(), kind.label());
                if ui.selectable_label(status.demo == Some(kind), label).clicked() {
                    app.activate(OverlayWidget::DemoButton(kind));
                }
            }
            if let Some(kind) = status.demo {
                ui.horizontal(|ui| {
                    if ui.button("Stop").clicked() {
                        let context = app.context_mut();
                        context.controller.stop_demo(&mut context.model);
                        context.sync_view();
                    }
                    if kind == DemoKind::CurveDesigner && ui.button("Reset curve").clicked() {
                        let context = app.context_mut();
                        context.controller.demos_mut().reset_curve(&mut context.model);
                        context.view.request_redraw();
                    }
                });
                egui::CollapsingHeader::new("Settings")
                    .default_open(false)
                    .show(ui, |ui| demo_settings(app, ui, kind));
            }
            ui.separator();

            ui.horizontal(|ui| {
                for view in ViewId::ALL {
                    let current = app.context().view.current_view() == view;
                    if ui.selectable_label(current, view.label()).clicked() {
                        app.activate(OverlayWidget::ViewButton(view));
                    }
                }
            });
            ui.separator();
            ui.label(format!("Shapes: {}", status.shape_count));
            if let Some(id) = status.selection {
                ui.label(format!("Selected: {}", &id.to_string()[..8]));
            }
        });
}
