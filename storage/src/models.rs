use bson::oid::ObjectId;
use landscape2d::{Color, Palette, PaletteError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub title: String,
    // lower-case theme words, e.g. "sunset", "forest"
    pub keywords: Vec<String>,
    // hex codes, back layer first, sky colour last
    pub colors: Vec<String>,
}

impl PaletteDoc {
    pub fn new(title: &str, keywords: &[&str], colors: &[&str]) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn rgb(&self) -> Result<Vec<Color>, PaletteError> {
        Palette::parse_hex(self.colors.as_slice())
    }
}
