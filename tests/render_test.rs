#![cfg(feature = "integration-tests")]

mod common;

use common::test_utils::{HEIGHT, WIDTH, empty_stage, ms, test_config};
use neon_folio::{Config, context, renderer::SceneRenderer, sections};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[tokio::test]
async fn should_render_clear_colour() -> anyhow::Result<()> {
    let (device, queue) = context::headless().await?;
    let config = Config {
        particle_count: 0,
        clear_colour: wgpu::Color::WHITE,
        ..test_config()
    };
    let mut stage = empty_stage(&config);
    let list = stage.tick(ms(16));
    assert!(list.is_empty());

    let mut renderer = SceneRenderer::new(&device, &queue, FORMAT, [WIDTH, HEIGHT]);
    let pixels = renderer
        .capture(&device, &queue, stage.scene_mut(), &list)
        .await?;

    let colour = wgpu::Color::WHITE;
    let expected = [to_u8(colour.r), to_u8(colour.g), to_u8(colour.b), to_u8(colour.a)];
    assert_eq!(pixels.len(), (WIDTH * HEIGHT * 4) as usize);
    for pixel in pixels.chunks_exact(4) {
        assert_eq!(pixel, expected);
    }
    Ok(())
}

#[tokio::test]
async fn should_draw_the_backdrop_over_the_clear_colour() -> anyhow::Result<()> {
    let (device, queue) = context::headless().await?;
    let config = Config {
        clear_colour: wgpu::Color::BLACK,
        ..test_config()
    };
    let mut stage = empty_stage(&config);
    for flow in sections::all() {
        stage.register(flow);
    }
    let mut renderer = SceneRenderer::new(&device, &queue, FORMAT, [WIDTH, HEIGHT]);

    // particles are re-uploaded every frame they move
    let mut pixels = Vec::new();
    for i in 1..=3 {
        let list = stage.tick(ms(i * 16));
        pixels = renderer
            .capture(&device, &queue, stage.scene_mut(), &list)
            .await?;
        assert!(!stage.scene().particles.is_dirty());
    }

    let lit = pixels
        .chunks_exact(4)
        .filter(|p| p[0] > 0 || p[1] > 0 || p[2] > 0)
        .count();
    assert!(lit > 0, "nothing but the clear colour was drawn");

    if let Some(img) = image::RgbaImage::from_raw(WIDTH, HEIGHT, pixels) {
        let out = std::env::temp_dir().join("neon-folio-backdrop.png");
        img.save(&out)?;
    }
    Ok(())
}

#[tokio::test]
async fn should_overlay_glitch_when_enabled() -> anyhow::Result<()> {
    let (device, queue) = context::headless().await?;
    let config = Config {
        particle_count: 0,
        clear_colour: wgpu::Color::BLACK,
        glitch_intensity: Some(1.0),
        ..test_config()
    };
    let mut stage = empty_stage(&config);
    let list = stage.tick(ms(1000));
    let mut renderer = SceneRenderer::new(&device, &queue, FORMAT, [WIDTH, HEIGHT]);
    let pixels = renderer
        .capture(&device, &queue, stage.scene_mut(), &list)
        .await?;
    assert_eq!(pixels.len(), (WIDTH * HEIGHT * 4) as usize);
    Ok(())
}
