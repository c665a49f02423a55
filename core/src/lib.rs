// core holds the midpoint displacement, sampling and rasterization steps
pub mod backdrop;
pub mod displacement;
pub mod error;
pub mod layer;
pub mod palette;
pub mod raster;
pub mod sampler;
pub mod scene;

pub use backdrop::{Backdrop, DaySky, Disc, Fill, NightSky};
pub use displacement::{
    FixedSigns, MAX_ITERATIONS, MidpointDisplacement, RandomSigns, SignSource, midpoint_displacement,
};
pub use error::{Result, TerrainError};
pub use layer::{DenseLayer, Layer, Point};
pub use palette::{DEFAULT_PALETTE, Palette, PaletteError};
pub use raster::{Bounds, Color, PixelBuffer, RasterStats, rasterize, rasterize_layers};
pub use sampler::sample;
pub use scene::{LayerParams, Scene, SceneConfig, build_scene};
