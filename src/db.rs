use anyhow::Result;
use mongodb::{
    Client, Collection, Database,
    bson::Document,
    options::{ClientOptions, ServerApi, ServerApiVersion},
};

use crate::config::AppConfig;
use crate::models::{CartItem, Invoice, Order, Review, User};

/// Typed handles for every collection the API touches.
#[derive(Clone)]
pub struct Store {
    pub users: Collection<User>,
    /// Products are stored verbatim as sent, so the collection stays schemaless.
    pub products: Collection<Document>,
    pub reviews: Collection<Review>,
    pub cart: Collection<CartItem>,
    pub orders: Collection<Order>,
    pub invoices: Collection<Invoice>,
}

impl Store {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
            products: db.collection("products"),
            reviews: db.collection("reviews"),
            cart: db.collection("cart"),
            orders: db.collection("orders"),
            invoices: db.collection("invoices"),
        }
    }
}

/// Build a MongoDB client and the collection handles for the configured
/// database. The client connects lazily, so this succeeds even when the
/// server is down.
pub async fn connect(config: &AppConfig) -> Result<(Client, Store)> {
    let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    let client = Client::with_options(options)?;
    let store = Store::new(&client.database(&config.database_name));
    Ok((client, store))
}
