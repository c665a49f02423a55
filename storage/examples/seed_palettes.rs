// Loads a few themed palettes into the local palette collection
use landscape2d_storage::PaletteStore;
use landscape2d_storage::models::PaletteDoc;

#[tokio::main]
async fn main() -> mongodb::error::Result<()> {
    let palettes = [
        PaletteDoc::new(
            "Ember Dusk",
            &["sunset", "warm"],
            &["F6B092", "E0736A", "A34A5A", "5C2A4D", "2B1B36", "FCE3C2"],
        ),
        PaletteDoc::new(
            "Pine Ridge",
            &["forest", "green"],
            &["A8C69F", "6F9A6B", "3F6B4A", "22412F", "112219", "E4EEDC"],
        ),
        PaletteDoc::new(
            "Glacier",
            &["ice", "winter", "blue"],
            &["C9DDEB", "94B6D2", "5E88AE", "35587F", "1A2E4A", "F2F7FA"],
        ),
    ];

    let store = PaletteStore::init("mongodb://localhost:27017", "palette_db", "palettes").await?;
    for doc in palettes {
        println!("Storing {}", doc.title);
        store.create(doc).await?;
    }
    println!("Palettes: {:?}", store.list_titles().await?);

    Ok(())
}
