//! Headless playground for the penumbra composition core.
//!
//! Writes a few procedural textures, loads a scene against the software
//! backend, then replays the kind of edits a control panel would produce
//! and reports what the reconciler did.

mod assets;
mod backend;

use anyhow::Result;
use pollster::block_on;

use penumbra_scene::config::{SceneConfig, SpriteConfig};
use penumbra_scene::coords::Vec2;
use penumbra_scene::logging::init_logging;
use penumbra_scene::mesh::{ShaderProgram, U_NORMAL, UniformValue};
use penumbra_scene::scene::SceneManager;

use backend::SoftBackend;

const LIGHTING_VS: &str = include_str!("shaders/lighting.vert");
const LIGHTING_FS: &str = include_str!("shaders/lighting.frag");

fn main() -> Result<()> {
    init_logging(None);

    println!();
    println!("  penumbra-studio — composition core harness");
    println!("  software backend · procedural textures · no window");
    println!();

    let asset_dir = std::env::temp_dir().join("penumbra-studio");
    let assets = assets::write_demo_textures(&asset_dir)?;
    log::info!("demo textures written to {}", asset_dir.display());

    let lantern = assets.lantern.to_string_lossy().into_owned();
    let lantern_normal = assets.lantern_normal.to_string_lossy().into_owned();
    let floor = assets.floor.to_string_lossy().into_owned();
    let barrel = assets.barrel.to_string_lossy().into_owned();

    let barrel_config = SpriteConfig {
        position: Some(Vec2::new(40.0, 2.0)),
        z_order: Some(5),
        ..SpriteConfig::new(barrel)
    };
    let scene = SceneConfig::new()
        .with(
            "floor",
            SpriteConfig {
                z_order: Some(-10),
                casts_shadows: Some(false),
                ..SpriteConfig::new(floor)
            },
        )
        .with(
            "lantern",
            SpriteConfig {
                normal: Some(lantern_normal),
                position: Some(Vec2::new(24.0, 8.0)),
                ..SpriteConfig::new(lantern.clone())
            },
        )
        .with("barrel", barrel_config.clone());

    let shader = ShaderProgram::new(LIGHTING_VS, LIGHTING_FS)
        .with_uniform("u_light_pos", UniformValue::Vec3([32.0, 8.0, 20.0]))
        .with_uniform("u_ambient", UniformValue::Float(0.25));

    let mut manager = SceneManager::new(SoftBackend::new(), shader);
    block_on(manager.load_scene(&scene))?;

    report(&manager, "after load");

    // The kind of edit stream a slider panel produces: nudge the lantern,
    // push the barrel behind the floor, disable the lantern's normal map.
    let edit = SceneConfig::new()
        .with(
            "lantern",
            SpriteConfig {
                position: Some(Vec2::new(30.0, 6.0)),
                rotation: Some(0.6),
                ..SpriteConfig::new(lantern.clone())
            },
        )
        .with("barrel", SpriteConfig { z_order: Some(-20), ..barrel_config });
    block_on(manager.update_from_config(&edit))?;

    let toggle = SceneConfig::new().with(
        "lantern",
        SpriteConfig { use_normal_map: Some(false), ..SpriteConfig::new(lantern) },
    );
    block_on(manager.update_from_config(&toggle))?;

    report(&manager, "after edits");
    if let Some(mesh) = manager.get("lantern").and_then(|s| s.mesh())
        && let Some(UniformValue::Texture(normal)) = mesh.uniforms.get(U_NORMAL)
    {
        println!("  lantern normal slot: {}", normal.label());
    }
    println!(
        "  container re-sorts: {} (batched across {} edits)",
        manager.backend().sort_count(),
        2
    );

    let saved = asset_dir.join("scene.json");
    std::fs::write(&saved, manager.export_config().to_json()?)?;
    println!("  scene exported to {}", saved.display());
    println!();

    Ok(())
}

fn report(manager: &SceneManager<SoftBackend>, heading: &str) {
    println!("  [{heading}]");
    for sprite in manager.sprites_by_z_order() {
        let spec = sprite.spec();
        let top_left = sprite
            .geometry()
            .map(|g| format!("({:.1}, {:.1})", g.top_left().x, g.top_left().y))
            .unwrap_or_else(|| "unbuilt".to_owned());
        println!(
            "    z {:>4}  {:10}  top-left {:16}  visible {}",
            spec.z_order,
            sprite.key(),
            top_left,
            spec.visible,
        );
    }
    let casters: Vec<&str> = manager.shadow_casters().map(|s| s.key()).collect();
    println!("    shadow casters: {casters:?}");
    let container: Vec<u32> = manager.backend().draw_order().collect();
    println!("    draw container: {container:?}");
    println!();
}
