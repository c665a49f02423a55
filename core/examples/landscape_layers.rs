// Generates and saves one image per stage of the landscape:
// each ridge on its own, then the composited scene
use landscape2d::{
    Backdrop, Bounds, Fill, NightSky, Palette, PixelBuffer, RandomSigns, Scene, SceneConfig, rasterize, sample,
};
use std::path::Path;

fn main() -> landscape2d::Result<()> {
    let config = SceneConfig::default();
    let scene = Scene::generate(&config, &mut RandomSigns::seeded(2025))?;
    let palette = Palette::default();

    // 1) Every ridge alone on the sky colour
    for (i, layer) in scene.layers().iter().enumerate() {
        let mut img = PixelBuffer::new(config.width, config.height);
        Fill(palette.background()).paint(&mut img);
        let stats = rasterize(&mut img, &sample(layer), palette.layer_color(i), Bounds::Clip)?;
        let filename = format!("landscape_layer{i}.png");
        img.save(Path::new(&filename)).unwrap();
        println!("Saved {} ({} points clipped)", filename, stats.points_clipped);
    }

    // 2) All ridges back to front under the moon
    let img = scene.render(&palette, &NightSky::default(), Bounds::Clip)?;
    img.save(Path::new("landscape_night.png")).unwrap();
    println!("Saved landscape_night.png");
    Ok(())
}
