use egui::{Color32, Context, RichText, ScrollArea, Ui};
use std::sync::atomic::Ordering;

use crate::geometry::FrameStats;
use crate::geometry::icosphere::MAX_SUBDIVISIONS;
use crate::renderer::CameraMode;
use crate::ui::presets::FIRE_PRESETS;
use crate::ui::state::UiState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub load_scene: bool,
    pub reset_camera: bool,
}

pub fn draw_side_panel(
    ctx: &Context,
    state: &mut UiState,
    stats: &FrameStats,
    last_error: &Option<String>,
    rebuilding: bool,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(300.0)
        .max_width(380.0)
        .default_width(320.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("FIRE 3D").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("FBM-driven procedural fire")
                        .color(TEXT_MUTED)
                        .size(11.0),
                );
                ui.add_space(16.0);

                section_header(ui, "PRESET");
                egui::ComboBox::from_id_salt("fire_presets")
                    .selected_text(FIRE_PRESETS[state.selected_preset].name)
                    .width(ui.available_width())
                    .show_ui(ui, |ui| {
                        for (i, preset) in FIRE_PRESETS.iter().enumerate() {
                            if ui
                                .selectable_label(state.selected_preset == i, preset.name)
                                .clicked()
                            {
                                state.apply_preset(i);
                            }
                        }
                    });
                ui.add_space(4.0);
                ui.label(
                    RichText::new(FIRE_PRESETS[state.selected_preset].description)
                        .color(TEXT_MUTED)
                        .size(11.0)
                        .italics(),
                );
                ui.add_space(16.0);
                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "GEOMETRY");
                ui.horizontal(|ui| {
                    ui.label("Tessellation:");
                    ui.add(egui::Slider::new(
                        &mut state.tessellation,
                        0..=MAX_SUBDIVISIONS,
                    ));
                });
                if let Some(err) = last_error {
                    ui.add_space(6.0);
                    egui::Frame::default()
                        .fill(Color32::from_rgb(40, 15, 15))
                        .stroke(egui::Stroke::new(1.0, ACCENT_RED))
                        .rounding(4.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(err).color(ACCENT_RED).size(11.0));
                        });
                }
                ui.add_space(8.0);
                if ui
                    .add(
                        egui::Button::new(RichText::new("Load Scene").color(BG_PURE_BLACK))
                            .fill(ACCENT_EMBER)
                            .min_size(egui::vec2(ui.available_width(), 32.0)),
                    )
                    .clicked()
                {
                    actions.load_scene = true;
                }
                ui.add_space(16.0);

                section_header(ui, "FIRE");
                ui.horizontal(|ui| {
                    ui.label("Octaves:");
                    ui.add(egui::Slider::new(&mut state.fbm_octaves, 0..=16));
                });
                ui.horizontal(|ui| {
                    ui.label("Frequency:");
                    ui.add(egui::Slider::new(&mut state.fbm_freq, 0.0..=32.0).step_by(0.1));
                });
                ui.horizontal(|ui| {
                    ui.label("Amplitude:");
                    ui.add(egui::Slider::new(&mut state.fbm_amp, 0.0..=5.0).step_by(0.1));
                });
                ui.add_space(16.0);

                section_header(ui, "COLORS");
                egui::Grid::new("colors")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Fire");
                        ui.color_edit_button_rgba_unmultiplied(&mut state.fire_color);
                        ui.end_row();

                        ui.label("Background");
                        ui.color_edit_button_rgba_unmultiplied(&mut state.background_color);
                        ui.end_row();
                    });
                ui.add_space(16.0);
                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "VIEW");
                ui.horizontal(|ui| {
                    ui.label("Camera:");
                    if ui
                        .selectable_label(state.camera_mode == CameraMode::Orbital, "Orbital")
                        .clicked()
                    {
                        state.camera_mode = CameraMode::Orbital;
                    }
                    if ui
                        .selectable_label(state.camera_mode == CameraMode::Free, "Free")
                        .clicked()
                    {
                        state.camera_mode = CameraMode::Free;
                    }
                });
                ui.add_space(4.0);
                if ui.button("Reset Scene").clicked() {
                    actions.reset_camera = true;
                }
                ui.add_space(16.0);

                section_header(ui, "PERFORMANCE");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut state.vsync_enabled, "VSync");
                    ui.checkbox(&mut state.show_stats, "Stats");
                });
                ui.horizontal(|ui| {
                    ui.checkbox(&mut state.fps_cap_enabled, "FPS Cap:");
                    ui.add_enabled(
                        state.fps_cap_enabled,
                        egui::DragValue::new(&mut state.fps_cap)
                            .range(30..=500)
                            .suffix(" fps"),
                    );
                });
                ui.add_space(16.0);

                if state.show_stats {
                    ui.separator();
                    ui.add_space(12.0);
                    stats_panel(ui, stats, rebuilding);
                }
            });
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn stats_panel(ui: &mut Ui, stats: &FrameStats, rebuilding: bool) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id =
                Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps = *stats.fps.lock();
            let fps_color = if fps >= 60.0 {
                ACCENT_GREEN
            } else if fps >= 30.0 {
                ACCENT_FLAME
            } else {
                ACCENT_RED
            };

            egui::Grid::new("stats")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("FPS").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("{:.0}", fps)).color(fps_color));
                    ui.end_row();

                    ui.label(RichText::new("Vertices").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(fmt_num(stats.scene_vertices.load(Ordering::Relaxed)))
                            .color(TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(fmt_num(stats.scene_triangles.load(Ordering::Relaxed)))
                            .color(TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Rebuild ms").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(format!("{:.1}", *stats.last_rebuild_ms.lock()))
                            .color(TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Rebuilds").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(format!("{}", stats.rebuild_count.load(Ordering::Relaxed)))
                            .color(TEXT_PRIMARY),
                    );
                    ui.end_row();
                });

            ui.add_space(8.0);

            let status = if rebuilding {
                RichText::new("REBUILDING").color(ACCENT_FLAME).strong()
            } else {
                RichText::new("LIVE").color(ACCENT_GREEN)
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new("Status:").color(TEXT_MUTED));
                ui.label(status);
            });
        });
}

pub fn draw_help_overlay(ctx: &Context, pos: [f32; 3], mode: CameraMode) {
    let bindings = match mode {
        CameraMode::Orbital => "RMB+Drag - Orbit | MMB+Drag - Pan | Scroll - Zoom",
        CameraMode::Free => "WASD - Move | RMB+Drag - Look | MMB+Drag - Pan | Scroll - Speed",
    };

    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(RichText::new(bindings).color(TEXT_MUTED));
                    ui.label(
                        RichText::new(format!(
                            "Eye: ({:.1}, {:.1}, {:.1})",
                            pos[0], pos[1], pos[2]
                        ))
                        .color(TEXT_MUTED),
                    );
                });
        });
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}
