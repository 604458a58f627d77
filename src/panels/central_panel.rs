use kurbo::Size;

use crate::PaintApp;
use crate::renderer;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::WHITE))
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::click_and_drag());
            let rect = response.rect;

            app.context_mut()
                .resize(Size::new(rect.width() as f64, rect.height() as f64));
            app.handle_input(ctx, &response);

            let context = app.context();
            renderer::paint_scene(
                &painter,
                rect.min,
                context.model.scene(),
                context.controller.preview(),
                context.model.selection(),
            );
        });
}
