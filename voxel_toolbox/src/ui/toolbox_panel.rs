//! Toolbox panel: mode selector, target inputs, action button, status line.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::data::{GatewayChannel, MATERIAL_COUNT};
use crate::scene::PALETTE;
use crate::toolbox::{InteractionMode, Toolbox};
use crate::world::VoxelWorld;

/// Shown for the whole session when no wallet signer was found at startup.
#[derive(Resource, Default, Debug)]
pub struct WalletBanner {
    pub missing: bool,
}

pub fn toolbox_panel_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<WalletBanner>()
        .add_systems(Update, (wallet_banner_system, toolbox_panel_system));
}

fn wallet_banner_system(mut contexts: EguiContexts, banner: Res<WalletBanner>) {
    if !banner.missing {
        return;
    }
    egui::TopBottomPanel::top("wallet_banner")
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgb(120, 30, 40))
                .inner_margin(egui::Margin::same(8)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.label(
                egui::RichText::new(
                    "No wallet configured. Set WALLET_PRIVATE_KEY and restart to place voxels.",
                )
                .color(egui::Color32::WHITE),
            );
        });
}

fn toolbox_panel_system(
    mut contexts: EguiContexts,
    mut toolbox: ResMut<Toolbox>,
    world: Res<VoxelWorld>,
    channel: Res<GatewayChannel>,
) {
    let toolbox = &mut *toolbox;
    let max_coord = f64::from(toolbox.world_size()) - 1.0;

    egui::Window::new("Toolbox")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.horizontal(|ui| {
                for mode in InteractionMode::ALL {
                    if ui
                        .selectable_label(toolbox.mode() == mode, mode.label())
                        .clicked()
                    {
                        toolbox.set_mode(mode);
                        if mode != InteractionMode::Place {
                            toolbox.clear_preview();
                        }
                    }
                }
            });
            ui.separator();

            let mut changed = false;
            ui.horizontal(|ui| {
                let cursor = &mut toolbox.cursor;
                for (label, value) in [("x", &mut cursor.x), ("y", &mut cursor.y), ("z", &mut cursor.z)]
                {
                    ui.label(label);
                    changed |= ui
                        .add(
                            egui::DragValue::new(value)
                                .speed(0.25)
                                .range(0.0..=max_coord)
                                .max_decimals(0),
                        )
                        .changed();
                }
            });

            if matches!(
                toolbox.mode(),
                InteractionMode::Place | InteractionMode::Repaint
            ) {
                ui.horizontal(|ui| {
                    ui.label("material");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut toolbox.cursor.material)
                                .speed(0.1)
                                .range(0.0..=f64::from(MATERIAL_COUNT - 1))
                                .max_decimals(0),
                        )
                        .changed();
                    let index = toolbox.cursor.material.max(0.0) as usize % PALETTE.len();
                    ui.colored_label(swatch(PALETTE[index]), "■■");
                });
            }

            if toolbox.mode() == InteractionMode::Transfer {
                ui.horizontal(|ui| {
                    ui.label("to");
                    ui.text_edit_singleline(&mut toolbox.cursor.destination);
                });
            }

            if changed && toolbox.mode() == InteractionMode::Place {
                let cursor = toolbox.cursor.clone();
                toolbox.update_preview(&world, cursor.x, cursor.y, cursor.z, cursor.material);
            }

            ui.add_space(6.0);
            if ui.button(toolbox.mode().label()).clicked() {
                let _ = toolbox.submit_cursor(&world, &*channel);
            }

            ui.add_space(6.0);
            match toolbox.status.visible() {
                Some(Ok(msg)) => {
                    ui.colored_label(egui::Color32::from_rgb(100, 220, 140), msg);
                }
                Some(Err(msg)) => {
                    ui.colored_label(egui::Color32::from_rgb(240, 110, 110), msg);
                }
                None => {}
            }
        });
}

fn swatch(hex: u32) -> egui::Color32 {
    let [_, r, g, b] = hex.to_be_bytes();
    egui::Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatch_matches_palette_bytes() {
        assert_eq!(swatch(0xbe2633), egui::Color32::from_rgb(0xbe, 0x26, 0x33));
    }
}
