//storage holds the MongoDB palette collection & async CRUD

pub mod models;

use crate::models::PaletteDoc;
use bson::doc;
use futures_util::stream::TryStreamExt;
use log::debug;
use mongodb::{Client, Collection, IndexModel, options::ClientOptions};

pub struct PaletteStore {
    col: Collection<PaletteDoc>,
}

impl PaletteStore {
    // Initialize the MongoDB collection
    pub async fn init(uri: &str, db_name: &str, col_name: &str) -> mongodb::error::Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("landscape2d".to_string());
        let client = Client::with_options(opts)?;
        let col = client.database(db_name).collection(col_name);

        // Themes are looked up by keyword
        let index_model = IndexModel::builder().keys(doc! { "keywords": 1 }).build();
        col.create_index(index_model).await?;

        Ok(Self { col })
    }

    // Palettes tagged with `keyword`, at most `limit` of them
    pub async fn search(&self, keyword: &str, limit: i64) -> mongodb::error::Result<Vec<PaletteDoc>> {
        let keyword = keyword.trim().to_lowercase();
        let mut cursor = self
            .col
            .find(doc! { "keywords": &keyword })
            .limit(limit)
            .await?;
        let mut found = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            found.push(doc);
        }
        debug!("{} palettes match theme `{keyword}`", found.len());
        Ok(found)
    }

    pub async fn list_titles(&self) -> mongodb::error::Result<Vec<String>> {
        let mut cursor = self.col.find(doc! {}).await?;
        let mut titles = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            titles.push(doc.title);
        }
        Ok(titles)
    }

    // Insert a palette, replacing any palette with the same title
    pub async fn create(&self, doc_obj: PaletteDoc) -> mongodb::error::Result<()> {
        self.col
            .delete_one(doc! { "title": &doc_obj.title })
            .await?;
        self.col.insert_one(doc_obj).await?;
        Ok(())
    }

    pub async fn read_by_title(&self, title: &str) -> mongodb::error::Result<Option<PaletteDoc>> {
        self.col.find_one(doc! { "title": title }).await
    }

    // Delete by title (for clean-up)
    pub async fn delete_by_title(&self, title: &str) -> mongodb::error::Result<()> {
        self.col.delete_one(doc! { "title": title }).await?;
        Ok(())
    }
}
