use stronghold_game::FrameLoop;
use stronghold_render::Backend;

/// Debug window toggled with F1.
pub fn draw<B: Backend>(ctx: &egui::Context, frames: &FrameLoop<B>) {
    let state = frames.state();
    let context = frames.context();
    let camera = state.camera();

    egui::Window::new("Stronghold Royale")
        .default_pos([10.0, 10.0])
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Frame");
            ui.label(format!("FPS: {:.1}", context.stats.fps()));
            ui.label(format!(
                "avg {:.2} ms / max {:.2} ms",
                context.stats.average().as_secs_f64() * 1000.0,
                context.stats.max().as_secs_f64() * 1000.0
            ));
            ui.label(format!("tick: {:.4} s", context.variables.tick()));

            ui.separator();
            ui.heading("Camera");
            let p = camera.position();
            ui.label(format!("position: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
            let angles = camera.angles();
            ui.label(format!("yaw {:.1} / pitch {:.1}", angles.x, angles.y));
            ui.label(format!("fov: {:.0}", camera.fov()));

            ui.separator();
            ui.heading("Scene");
            ui.label(format!("scenario: {}", state.config().scenario));
            ui.label(format!("entities: {}", state.scene().len()));
            for (id, entity) in state.scene().iter().filter(|(_, e)| e.is_outlined()) {
                ui.label(format!("selected: {} [{}]", entity.name, id.short()));
            }
            if let Some(ray) = state.scene().last_ray() {
                let end = ray.end();
                ui.small(format!("last ray to ({:.0}, {:.0}, {:.0})", end.x, end.y, end.z));
            }

            ui.separator();
            ui.small("F1: overlay | WASD/Space/C: move | LMB: pick | Esc: quit");
        });
}
