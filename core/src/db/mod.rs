pub mod enums;
pub mod modlog;
pub mod settings;

use std::sync::OnceLock;

use mongodb::{Client, Database};
pub use mongodb::{bson::doc, error::Error as MongoError};
use tracing::info;

use crate::env::env;

pub use enums::{ActorPermissions, GuildFlag, ModAction};
pub use modlog::ModLog;
pub use settings::GuildSettings;


static MONGO: OnceLock<Database> = OnceLock::new();

pub async fn init_mongo(ping: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mongo = Client::with_uri_str(&env().mongo_url)
        .await?
        .database(&env().mongo_db);

    // ? ping because simply creating the client doesn't
    // ? actually connect to the database
    if ping {
        mongo.run_command(doc! {"ping": 1}).await?;
    }

    info!(database = %env().mongo_db, "connected to mongo");

    MONGO.set(mongo).expect("Failed to set Mongo client");

    Ok(())
}

pub fn mongo() -> &'static Database {
    MONGO.get().expect("Mongo client not initialized")
}
