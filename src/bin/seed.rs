use mongodb::bson::{Document, doc};

use myshop_api::{config::AppConfig, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let (_client, store) = db::connect(&config).await?;

    let products = demo_products();
    let mut inserted = 0;
    for product in &products {
        let name = product.get_str("itemName")?;
        // Re-running the seed leaves existing rows alone.
        if store
            .products
            .find_one(doc! { "itemName": name })
            .await?
            .is_some()
        {
            continue;
        }
        store.products.insert_one(product).await?;
        inserted += 1;
    }

    println!(
        "Seed completed: {inserted} of {} demo products inserted",
        products.len()
    );
    Ok(())
}

fn demo_products() -> Vec<Document> {
    vec![
        doc! {
            "itemName": "Walnut Coffee Table",
            "images": ["https://example.com/img/walnut-coffee-table.jpg"],
            "sellPrice": 149.99,
            "stock": 12,
            "category": "furniture",
        },
        doc! {
            "itemName": "Ceramic Table Lamp",
            "images": [
                "https://example.com/img/ceramic-lamp-front.jpg",
                "https://example.com/img/ceramic-lamp-side.jpg",
            ],
            "sellPrice": 39.5,
            "stock": 40,
            "category": "lighting",
        },
        doc! {
            "itemName": "Linen Throw Pillow",
            "images": ["https://example.com/img/linen-pillow.jpg"],
            "sellPrice": 18,
            "stock": 120,
            "category": "textiles",
        },
        doc! {
            "itemName": "Oak Bookshelf",
            "images": ["https://example.com/img/oak-bookshelf.jpg"],
            "sellPrice": 229.0,
            "stock": 7,
            "category": "furniture",
        },
    ]
}
