use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use image::ImageFormat;
use landscape2d::{Bounds, DaySky, NightSky, Palette, PixelBuffer, RandomSigns, Scene, SceneConfig};
use log::info;

mod theme;

const NIGHT_FILE: &str = "LandscapeNightLines.png";
const DAY_FILE: &str = "Landscape.png";

// 2D procedural landscape generator
#[derive(Parser, Debug)]
#[command(name = "landscape2d", version, about = "2D procedural landscape generator")]
struct Args {
    /// Theme for the colour palette
    #[arg(short, long)]
    theme: Option<String>,

    /// MongoDB URI of the palette store searched for the theme
    #[arg(long, value_name = "URI")]
    palette_db: Option<String>,

    /// Seed for the terrain and the palette pick (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON scene description replacing the built-in four ridges
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the images are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SceneConfig> {
    let Some(path) = path else {
        return Ok(SceneConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: SceneConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn save(image: &PixelBuffer, dir: &Path, name: &str) -> anyhow::Result<()> {
    let path = dir.join(name);
    image
        .save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");

    let config = load_config(args.config.as_deref())?;
    let scene = Scene::generate(&config, &mut RandomSigns::seeded(seed))?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    // Moonlit silhouette always uses the fixed palette
    let night = scene.render(&Palette::default(), &NightSky::default(), Bounds::Clip)?;
    save(&night, &args.out_dir, NIGHT_FILE)?;

    let palette = theme::resolve(
        args.theme.as_deref(),
        args.palette_db.as_deref(),
        scene.layers().len(),
        seed,
    );
    let day = scene.render(&palette, &DaySky::new(palette.background()), Bounds::Clip)?;
    save(&day, &args.out_dir, DAY_FILE)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_theme_only() {
        let args = Args::try_parse_from(["landscape2d", "--theme", "sunset"]).unwrap();
        assert_eq!(args.theme.as_deref(), Some("sunset"));
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(args.seed.is_none());
    }

    #[test]
    fn args_short_flags() {
        let args = Args::try_parse_from(["landscape2d", "-t", "forest", "-s", "42", "-o", "out"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn missing_config_path_is_default() {
        assert_eq!(load_config(None).unwrap(), SceneConfig::default());
    }

    #[test]
    fn save_writes_png_whatever_the_name() {
        let dir = std::env::temp_dir().join(format!("landscape2d-save-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        save(&PixelBuffer::new(3, 2), &dir, "scene.out").unwrap();
        let bytes = fs::read(dir.join("scene.out")).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        fs::remove_dir_all(&dir).unwrap();
    }
}
