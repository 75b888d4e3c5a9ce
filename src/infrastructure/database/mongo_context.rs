use std::error::Error;
use serde::{Deserialize, Serialize};
use mongodb::{options::ClientOptions, Client, Collection, Database};
use regex::Regex;

#[derive(Clone, Debug)]
pub struct MongoContext {
    db: Database
}

impl MongoContext {
    
    pub async fn init(uri: &str, db_name: &str) -> Result<MongoContext, Box<dyn Error>> {
        log::info!("Attempting to connect to MongoDB database '{}'", db_name);

        Self::validate_mongo_uri(uri)?;

        let mut client_options = ClientOptions::parse(uri)
            .await?;
        
        client_options.app_name = Some("PetClinic".to_string());
        
        let client = Client::with_options(client_options)
            .map_err(|e| {
                log::error!("Failed to create MongoDB client: {}", e);
                format!("Failed to create MongoDB client: {}", e)
            })?;
        
        client.list_database_names()
            .await
            .map_err(|e| {
                log::error!("Failed to connect to MongoDB: {}", e);
                format!("Failed to connect to MongoDB: {}", e)
            })?;
        
        let db = client.database(db_name);
        log::info!("Connected to MongoDB database: {}", db_name);
        
        Ok(MongoContext { db })
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.db.collection::<T>(name)
    }

    fn validate_mongo_uri(uri: &str) -> Result<(), Box<dyn Error>> {
        let trimmed_uri = uri.trim();
        if trimmed_uri.is_empty() {
            return Err("Invalid MongoDB URI: cannot be empty or whitespace".into());
        }

        if !trimmed_uri.starts_with("mongodb://") && !trimmed_uri.starts_with("mongodb+srv://") {
            return Err(format!("Invalid MongoDB URI: must start with 'mongodb://' or 'mongodb+srv://'. Got: {}", uri).into());
        }

        let host_part = if trimmed_uri.starts_with("mongodb://") {
            &trimmed_uri[10..] // Skip "mongodb://"
        } else {
            &trimmed_uri[14..] // Skip "mongodb+srv://"
        };

        if host_part.trim().is_empty() {
            return Err("Invalid MongoDB URI: missing host after protocol".into());
        }

        if uri.contains(char::is_whitespace) {
            return Err("Invalid MongoDB URI: cannot contain whitespace".into());
        }

        let re = Regex::new(r"^mongodb(\+srv)?://([^/\s]+)(/.*)?$")?;
        if !re.is_match(trimmed_uri) {
            return Err(format!("Invalid MongoDB URI format. Expected format: mongodb://host[:port][/database] or mongodb+srv://host[/database]. Got: {}", uri).into());
        }

        Ok(())
    }

}
