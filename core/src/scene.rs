use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::backdrop::{Backdrop, NightSky};
use crate::displacement::{MidpointDisplacement, RandomSigns, SignSource};
use crate::error::{Result, TerrainError};
use crate::layer::{DenseLayer, Layer, Point};
use crate::palette::Palette;
use crate::raster::{Bounds, PixelBuffer, rasterize_layers};
use crate::sampler::sample_all;

pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 500;

// Parameters of one midpoint displacement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    pub start: Point,
    pub end: Point,
    pub roughness: f64,
    #[serde(default)]
    pub initial_displacement: Option<f64>,
    pub iterations: u32,
}

impl LayerParams {
    pub fn generator(&self) -> MidpointDisplacement {
        let generator = MidpointDisplacement::new(self.start, self.end, self.roughness, self.iterations);
        match self.initial_displacement {
            Some(d) => generator.initial_displacement(d),
            None => generator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    // Back (drawn first) to front (drawn last)
    pub layers: Vec<LayerParams>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::landscape(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SceneConfig {
    // Four ridges: distant hills, mid hills, near hills, foreground slope.
    // Every layer runs out to the right edge of the image.
    pub fn landscape(width: u32, height: u32) -> Self {
        let right = f64::from(width);
        let layer = |start: (f64, f64), end_y: f64, roughness: f64, d: f64, iterations: u32| LayerParams {
            start: Point::from(start),
            end: Point::new(right, end_y),
            roughness,
            initial_displacement: Some(d),
            iterations,
        };

        Self {
            width,
            height,
            layers: vec![
                layer((0.0, 350.0), 320.0, 0.9, 250.0, 8),
                layer((0.0, 270.0), 190.0, 1.0, 120.0, 9),
                layer((0.0, 180.0), 80.0, 1.2, 30.0, 12),
                layer((250.0, 0.0), 200.0, 1.4, 20.0, 12),
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.layers.is_empty() {
            return Err(TerrainError::EmptyScene);
        }
        Ok(())
    }
}

// Generated sparse layers, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
}

impl Scene {
    // Layers draw from `signs` in back-to-front order, so one seed
    // reproduces the whole scene
    pub fn generate<S: SignSource + ?Sized>(config: &SceneConfig, signs: &mut S) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();

        let mut layers = Vec::with_capacity(config.layers.len());
        for (index, params) in config.layers.iter().enumerate() {
            let layer = params.generator().generate(&mut *signs)?;
            debug!(
                "layer {index}: {} points from x={} to x={}",
                layer.len(),
                params.start.x,
                params.end.x
            );
            layers.push(layer);
        }

        info!(
            "generated {} layers for a {}x{} scene in {:.2} ms",
            layers.len(),
            config.width,
            config.height,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self {
            width: config.width,
            height: config.height,
            layers,
        })
    }

    pub fn from_layers(width: u32, height: u32, layers: Vec<Layer>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        if layers.is_empty() {
            return Err(TerrainError::EmptyScene);
        }
        Ok(Self {
            width,
            height,
            layers,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn dense_layers(&self) -> Vec<DenseLayer> {
        sample_all(&self.layers)
    }

    // Allocate the buffer, paint the backdrop, then the layers back to front
    pub fn render(&self, palette: &Palette, backdrop: &dyn Backdrop, bounds: Bounds) -> Result<PixelBuffer> {
        let mut buffer = PixelBuffer::new(self.width, self.height);
        backdrop.paint(&mut buffer);

        let dense = self.dense_layers();
        // Too few colours for the layers falls back to the default palette
        let palette = Palette::for_layers(Some(palette.colors().to_vec()), dense.len());
        let stats = rasterize_layers(&mut buffer, &dense, &palette, bounds)?;
        info!(
            "rendered {} layers: {} pixels painted, {} points clipped",
            dense.len(),
            stats.pixels_painted,
            stats.points_clipped
        );
        Ok(buffer)
    }
}

// The four-ridge landscape over a night sky in the default palette
pub fn build_scene(width: u32, height: u32, seed: u64) -> Result<PixelBuffer> {
    let config = SceneConfig::landscape(width, height);
    let scene = Scene::generate(&config, &mut RandomSigns::seeded(seed))?;
    scene.render(&Palette::default(), &NightSky::default(), Bounds::Clip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::Fill;
    use crate::displacement::FixedSigns;
    use image::Rgb;

    #[test]
    fn scene_landscape_parameters() {
        let config = SceneConfig::default();
        assert_eq!((config.width, config.height), (900, 500));
        assert_eq!(config.layers.len(), 4);
        let back = &config.layers[0];
        assert_eq!(back.start, Point::new(0.0, 350.0));
        assert_eq!(back.end, Point::new(900.0, 320.0));
        assert_eq!(back.iterations, 8);
        let front = &config.layers[3];
        assert_eq!(front.start, Point::new(250.0, 0.0));
        assert_eq!(front.roughness, 1.4);
        assert_eq!(front.initial_displacement, Some(20.0));
    }

    #[test]
    fn scene_layer_point_counts() {
        let scene = Scene::generate(&SceneConfig::default(), &mut RandomSigns::seeded(1)).unwrap();
        let counts: Vec<usize> = scene.layers().iter().map(Layer::len).collect();
        assert_eq!(counts, vec![257, 513, 4097, 4097]);
    }

    #[test]
    fn scene_dense_layers_cover_their_span() {
        let scene = Scene::generate(&SceneConfig::default(), &mut RandomSigns::seeded(3)).unwrap();
        let dense = scene.dense_layers();
        assert_eq!(dense[0].len(), 901);
        assert_eq!(dense[3].len(), 651);
        assert_eq!(dense[3].first_column(), Some(250));
    }

    #[test]
    fn scene_same_seed_same_image() {
        let a = build_scene(300, 200, 77).unwrap();
        let b = build_scene(300, 200, 77).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scene_front_layer_wins_where_it_is_higher() {
        // flat ridges so the expected rows are exact
        let config = SceneConfig {
            width: 20,
            height: 20,
            layers: vec![
                LayerParams {
                    start: Point::new(0.0, 12.0),
                    end: Point::new(19.0, 12.0),
                    roughness: 1.0,
                    initial_displacement: Some(0.0),
                    iterations: 3,
                },
                LayerParams {
                    start: Point::new(0.0, 6.0),
                    end: Point::new(19.0, 6.0),
                    roughness: 1.0,
                    initial_displacement: Some(0.0),
                    iterations: 3,
                },
            ],
        };
        let scene = Scene::generate(&config, &mut FixedSigns::always(true)).unwrap();
        let (back, front, sky) = (Rgb([1, 1, 1]), Rgb([2, 2, 2]), Rgb([3, 3, 3]));
        let palette = Palette::from_colors(vec![back, front, sky]);
        let img = scene.render(&palette, &Fill(sky), Bounds::Reject).unwrap();
        for x in 0..20 {
            assert_eq!(*img.get_pixel(x, 7), sky);
            assert_eq!(*img.get_pixel(x, 8), back);
            assert_eq!(*img.get_pixel(x, 13), back);
            assert_eq!(*img.get_pixel(x, 14), front);
            assert_eq!(*img.get_pixel(x, 19), front);
        }
    }

    #[test]
    fn scene_from_fixed_layers() {
        let ridge = |y: f64| Layer::from_points(vec![Point::new(0.0, y), Point::new(9.0, y)]).unwrap();
        let scene = Scene::from_layers(10, 10, vec![ridge(5.0), ridge(3.0)]).unwrap();
        assert_eq!((scene.width(), scene.height()), (10, 10));

        let (a, b, sky) = (Rgb([9, 0, 0]), Rgb([0, 9, 0]), Rgb([0, 0, 9]));
        let img = scene
            .render(&Palette::from_colors(vec![a, b, sky]), &Fill(sky), Bounds::Reject)
            .unwrap();
        for x in 0..10 {
            assert_eq!(*img.get_pixel(x, 4), sky);
            assert_eq!(*img.get_pixel(x, 6), a);
            assert_eq!(*img.get_pixel(x, 7), b);
        }
        assert_eq!(Scene::from_layers(10, 10, Vec::new()).unwrap_err(), TerrainError::EmptyScene);
    }

    #[test]
    fn scene_small_palette_uses_default_colours() {
        let ridge = |y: f64| Layer::from_points(vec![Point::new(0.0, y), Point::new(9.0, y)]).unwrap();
        let scene = Scene::from_layers(10, 10, vec![ridge(5.0), ridge(3.0)]).unwrap();
        let sky = Rgb([0, 0, 9]);
        let img = scene
            .render(&Palette::from_colors(vec![Rgb([9, 0, 0])]), &Fill(sky), Bounds::Reject)
            .unwrap();
        let defaults = Palette::default();
        for x in 0..10 {
            assert_eq!(*img.get_pixel(x, 4), sky);
            assert_eq!(*img.get_pixel(x, 6), defaults.layer_color(0));
            assert_eq!(*img.get_pixel(x, 7), defaults.layer_color(1));
        }
    }

    #[test]
    fn scene_rejects_empty_config() {
        let config = SceneConfig {
            width: 10,
            height: 10,
            layers: Vec::new(),
        };
        let err = Scene::generate(&config, &mut RandomSigns::seeded(0)).unwrap_err();
        assert_eq!(err, TerrainError::EmptyScene);
    }

    #[test]
    fn scene_rejects_zero_size() {
        assert_eq!(
            build_scene(0, 10, 0).unwrap_err(),
            TerrainError::InvalidDimensions { width: 0, height: 10 }
        );
    }

    #[test]
    fn scene_invalid_layer_aborts_generation() {
        let mut config = SceneConfig::landscape(100, 100);
        config.layers[1].end.x = -5.0;
        let err = Scene::generate(&config, &mut RandomSigns::seeded(0)).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidInterval { .. }));
    }

    #[test]
    fn scene_config_from_json() {
        let json = r#"{
            "width": 64,
            "height": 32,
            "layers": [
                { "start": { "x": 0, "y": 10 }, "end": { "x": 64, "y": 20 }, "roughness": 1.1, "iterations": 5 }
            ]
        }"#;
        let config: SceneConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.layers[0].initial_displacement, None);
        assert_eq!(config.layers[0].generator().start_displacement(), 15.0);
    }
}
