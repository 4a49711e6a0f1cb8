//! Voxelchain: runs the voxel_toolbox app.

use voxel_toolbox::prelude::*;

fn main() {
    let _ = dotenvy::dotenv();

    let mut app = match VoxelAppBuilder::new().build() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("voxelchain: {err}");
            std::process::exit(1);
        }
    };
    app.run();
}
