//! HUD overlay: world stats, ledger activity, FPS counter.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use alloy_chains::Chain;

use crate::data::{GatewayChannel, GatewayEvent, VoxelGateway};
use crate::toolbox::Toolbox;
use crate::world::VoxelWorld;

/// Ledger activity seen since startup, updated as gateway events are ingested.
#[derive(Resource, Default, Debug)]
pub struct HudState {
    pub confirmed: u64,
    pub failed: u64,
    pub world_events: u64,
    pub latest_chain_id: Option<u64>,
}

impl HudState {
    pub fn update_from_event(&mut self, event: &GatewayEvent) {
        match event {
            GatewayEvent::Outcome(outcome) => match outcome.result {
                Ok(_) => self.confirmed += 1,
                Err(_) => self.failed += 1,
            },
            GatewayEvent::World(_) => self.world_events += 1,
            GatewayEvent::Network(status) => self.latest_chain_id = status.chain_id,
        }
    }
}

pub fn hud_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .init_resource::<HudState>()
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    world: Res<VoxelWorld>,
    channel: Res<GatewayChannel>,
    toolbox: Res<Toolbox>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    let wallet = channel.wallet_address();
    let owned = wallet.map_or(0, |w| world.iter().filter(|(_, r)| r.owner == w).count());

    egui::Window::new("Voxel World")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new(format!("Voxels {}", world.len()))
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.label(format!("Yours  {owned}"));
            ui.add_space(4.0);

            ui.label(format!("Confirmed  {}", hud.confirmed));
            ui.label(format!("Failed     {}", hud.failed));
            ui.label(format!("Events     {}", hud.world_events));
            ui.label(format!(
                "Chain      {}",
                format_chain(hud.latest_chain_id, toolbox.expected_chain())
            ));
            ui.add_space(4.0);

            ui.separator();
            ui.label(format!("Wallet  {}", format_wallet(wallet)));
            ui.label(format!("FPS  {fps:.0}"));
        });
}

/// Connected chain id, flagged when it is not the one voxels live on.
fn format_chain(id: Option<u64>, expected: Chain) -> String {
    match id {
        None => "unreachable".to_string(),
        Some(id) if id == expected.id() => format!("{id} ({expected})"),
        Some(id) => format!("{id} (want {expected})"),
    }
}

fn format_wallet(wallet: Option<alloy::primitives::Address>) -> String {
    match wallet {
        Some(address) => {
            let s = address.to_string();
            format!("{}..{}", &s[..8], &s[s.len() - 6..])
        }
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, TxHash};

    use super::*;
    use crate::data::{Coordinate, GatewayOutcome, NetworkStatus, VoxelOp, WorldEvent};

    #[test]
    fn counts_outcomes_and_events() {
        let mut hud = HudState::default();
        let op = VoxelOp::Destroy {
            at: Coordinate::new(0, 0, 0),
        };

        hud.update_from_event(&GatewayEvent::Outcome(GatewayOutcome {
            id: 1,
            op,
            result: Ok(TxHash::ZERO),
        }));
        hud.update_from_event(&GatewayEvent::Outcome(GatewayOutcome {
            id: 2,
            op,
            result: Err("reverted".into()),
        }));
        hud.update_from_event(&GatewayEvent::World(WorldEvent::Destroyed {
            at: Coordinate::new(0, 0, 0),
        }));
        hud.update_from_event(&GatewayEvent::Network(NetworkStatus {
            wallet: None,
            chain_id: Some(1),
        }));

        assert_eq!(hud.confirmed, 1);
        assert_eq!(hud.failed, 1);
        assert_eq!(hud.world_events, 1);
        assert_eq!(hud.latest_chain_id, Some(1));
    }

    #[test]
    fn chain_line_flags_the_wrong_network() {
        assert_eq!(format_chain(None, Chain::mainnet()), "unreachable");
        assert_eq!(format_chain(Some(1), Chain::mainnet()), "1 (mainnet)");
        assert_eq!(
            format_chain(Some(11155111), Chain::mainnet()),
            "11155111 (want mainnet)"
        );
    }

    #[test]
    fn wallet_is_abbreviated() {
        let wallet = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse::<Address>()
            .unwrap();
        assert_eq!(format_wallet(Some(wallet)), "0xf39Fd6..b92266");
        assert_eq!(format_wallet(None), "none");
    }
}
