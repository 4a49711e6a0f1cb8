//! SDK entry points and builder for composing the voxel app.

use bevy::log::{info, warn};
use bevy::prelude::*;

use crate::camera::camera_plugin;
use crate::config::{self, AppConfig, ConfigError};
use crate::data::evm::EvmGateway;
use crate::data::{init_local_channel, GatewayChannel};
use crate::scene::{
    draw_world_bounds, ingest_gateway_events, setup_palette, setup_scene, spawn_toolbox_voxel,
    sync_voxel_entities, update_toolbox_voxel,
};
use crate::toolbox::Toolbox;
use crate::ui::{hud_plugin, toolbox_panel_plugin, WalletBanner};
use crate::world::VoxelWorld;

/// Builder for constructing the voxel app with customizable plugins.
pub struct VoxelAppBuilder {
    config: Option<AppConfig>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_hud: bool,
    enable_toolbox_panel: bool,
    enable_world_bounds: bool,
}

impl Default for VoxelAppBuilder {
    fn default() -> Self {
        Self {
            config: None,
            window_title: "Voxelchain".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.05, 0.05, 0.08),
            enable_hud: true,
            enable_toolbox_panel: true,
            enable_world_bounds: true,
        }
    }
}

impl VoxelAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of reading the environment.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_toolbox_panel(mut self) -> Self {
        self.enable_toolbox_panel = false;
        self
    }

    pub fn disable_world_bounds(mut self) -> Self {
        self.enable_world_bounds = false;
        self
    }

    /// Build the Bevy app. Reads the environment when no config was given.
    pub fn build(self) -> Result<App, ConfigError> {
        let config = match self.config {
            Some(config) => config,
            None => config::app_config()?,
        };
        let wallet = config.wallet();
        let chain = config.gateway.chain;
        let channel = gateway_channel(&config)?;

        let mut toolbox = Toolbox::new(config.world_size, chain);
        if toolbox.check_wallet_presence(wallet).is_err() {
            warn!("no wallet signer configured; voxel operations are disabled");
        }

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(channel)
        .insert_resource(toolbox)
        .insert_resource(WalletBanner {
            missing: wallet.is_none(),
        })
        .init_resource::<VoxelWorld>()
        .add_plugins(camera_plugin)
        .add_systems(
            Startup,
            (setup_scene, (setup_palette, spawn_toolbox_voxel).chain()),
        )
        .add_systems(
            Update,
            (
                ingest_gateway_events,
                sync_voxel_entities,
                update_toolbox_voxel,
            )
                .chain(),
        );

        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_toolbox_panel {
            app.add_plugins(toolbox_panel_plugin);
        }
        if self.enable_world_bounds {
            app.add_systems(Update, draw_world_bounds);
        }

        Ok(app)
    }
}

/// Spawn the gateway worker the configuration asks for.
pub fn gateway_channel(config: &AppConfig) -> Result<GatewayChannel, ConfigError> {
    if config.offline {
        let seed = config.seed()?;
        info!("offline mode: local ledger with {} seed voxels", seed.len());
        return Ok(init_local_channel(
            config.wallet(),
            config.gateway.chain,
            seed,
        ));
    }
    Ok(EvmGateway::spawn(config.gateway.clone()))
}
