use crate::clients::{PostClient, ProductClient};
use crate::config::Config;
use crate::lifecycle::seed;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Unsupported DATABASE_URI '{0}': only memory:// is available")]
    UnsupportedDatabase(String),

    #[error("Seeding sample data failed: {0}")]
    Seed(String),
}

/// The store's data-access facade: one running actor per collection.
///
/// `LocalApi` is responsible for:
/// - **Lifecycle Management**: starting and stopping the collection actors
/// - **Access**: handing out the typed collection clients
///
/// # Example
///
/// ```ignore
/// let api = LocalApi::start(&config).await?;
/// let post = api.posts.create_post(PostCreate::new("Hi", "hi", "Body", "Ada")).await?;
/// api.shutdown().await?;
/// ```
pub struct LocalApi {
    pub posts: PostClient,
    pub products: ProductClient,

    /// Task handles for the running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl LocalApi {
    /// Validates the database URI, spawns both collection actors and seeds them if asked.
    pub async fn start(config: &Config) -> Result<Self, StartupError> {
        if !config.database_uri.starts_with("memory://") {
            return Err(StartupError::UnsupportedDatabase(config.database_uri.clone()));
        }

        let (post_actor, posts) = crate::post_collection::new(config.channel_capacity);
        let (product_actor, products) = crate::product_collection::new(config.channel_capacity);

        let post_handle = tokio::spawn(post_actor.run());
        let product_handle = tokio::spawn(product_actor.run());

        let api = Self {
            posts,
            products,
            handles: vec![post_handle, product_handle],
        };

        if config.seed {
            seed::load_sample_data(&api).await?;
        }
        info!(uri = %config.database_uri, "Local API ready");
        Ok(api)
    }

    /// Drops the clients and waits for every actor to drain its mailbox and exit.
    ///
    /// Clones of the clients held elsewhere keep their actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down Local API...");
        drop(self.posts);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Local API shutdown complete.");
        Ok(())
    }
}

/// Memoized accessor for the [`LocalApi`].
///
/// The first [`get`](LocalApiProvider::get) starts the facade; every later call,
/// concurrent ones included, returns the same instance.
pub struct LocalApiProvider {
    config: Config,
    cell: OnceCell<LocalApi>,
}

impl LocalApiProvider {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> Result<&LocalApi, StartupError> {
        self.cell
            .get_or_try_init(|| LocalApi::start(&self.config))
            .await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The facade, if it was ever started.
    pub fn into_inner(self) -> Option<LocalApi> {
        self.cell.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CollectionApi;
    use crate::model::PostCreate;

    #[tokio::test]
    async fn provider_starts_once_and_memoizes() {
        let provider = LocalApiProvider::new(Config::with_secret("s"));

        let first = provider.get().await.unwrap();
        first
            .posts
            .create_post(PostCreate::new("Hello", "hello", "Body", "Ada"))
            .await
            .unwrap();

        let second = provider.get().await.unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.posts.count(Default::default(), true).await, Ok(1));

        provider.into_inner().unwrap().shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn rejects_non_memory_database() {
        let mut config = Config::with_secret("s");
        config.database_uri = "mongodb://localhost/payload".into();
        assert!(matches!(
            LocalApi::start(&config).await,
            Err(StartupError::UnsupportedDatabase(_))
        ));
    }
}
