/// SR3D Terminal Demo - Shaded Cube
///
/// Renders a textured, lit cube with the software pipeline.
/// Controls:
///   - 1-4: Flat, texture, Gouraud, Phong shading
///   - WASD / Arrow Keys: Rotate the cube
///   - Space: Toggle auto-spin
///   - M: Toggle truecolor / ASCII output
///   - Q/ESC: Quit
use anyhow::Result;
use log::info;
use sr3d_core::Mesh;
use sr3d_terminal::{checker_texture, TerminalApp};

fn main() -> Result<()> {
    env_logger::init();

    let cube = Mesh::cube(1.6);
    let texture = checker_texture(64, 8)?;
    info!(
        "cube with {} vertices, {}x{} texture",
        cube.vertex_count(),
        texture.width(),
        texture.height()
    );

    let mut app = TerminalApp::new(cube, texture)?;
    app.run()?;

    Ok(())
}
