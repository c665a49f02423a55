use anyhow::Context;
use landscape2d::{Color, Palette};
use landscape2d_storage::PaletteStore;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const PALETTE_DB: &str = "palette_db";
pub const PALETTE_COLLECTION: &str = "palettes";
const SEARCH_LIMIT: i64 = 15;

// Palette for `theme`, or the default palette when there is no theme, no
// store, no match, a lookup failure or too few colours
pub fn resolve(theme: Option<&str>, db_uri: Option<&str>, layer_count: usize, seed: u64) -> Palette {
    let Some(theme) = theme else {
        return Palette::default();
    };
    let Some(uri) = db_uri else {
        warn!("no palette store given, ignoring theme `{theme}`");
        return Palette::default();
    };

    match fetch(theme, uri, seed) {
        Ok(colors) => Palette::for_layers(colors, layer_count),
        Err(e) => {
            warn!("palette lookup for theme `{theme}` failed, using default palette: {e:#}");
            Palette::default()
        }
    }
}

// One palette picked at random among the matches
fn fetch(theme: &str, uri: &str, seed: u64) -> anyhow::Result<Option<Vec<Color>>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let found = rt
        .block_on(async {
            let store = PaletteStore::init(uri, PALETTE_DB, PALETTE_COLLECTION).await?;
            store.search(theme, SEARCH_LIMIT).await
        })
        .with_context(|| format!("palette store at {uri}"))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let Some(doc) = found.choose(&mut rng) else {
        warn!("no palettes found for theme `{theme}`");
        return Ok(None);
    };
    info!("using palette `{}` for theme `{theme}`", doc.title);
    let colors = doc
        .rgb()
        .with_context(|| format!("palette `{}`", doc.title))?;
    Ok(Some(colors))
}
