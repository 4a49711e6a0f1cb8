mod hud;
mod toolbox_panel;

pub use hud::{hud_plugin, HudState};
pub use toolbox_panel::{toolbox_panel_plugin, WalletBanner};
