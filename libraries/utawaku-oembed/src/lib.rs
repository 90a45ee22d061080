//! Utawaku oEmbed Client
//!
//! Looks up video titles through an oEmbed provider so segments added
//! without a title get a sensible one.
//!
//! # Example
//!
//! ```ignore
//! use utawaku_oembed::{OEmbedClient, OEmbedConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OEmbedClient::new(OEmbedConfig::default())?;
//!
//!     // Typed errors
//!     let title = client.try_fetch_title("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("{title}");
//!
//!     // Or the forgiving variant: "" on failure
//!     let title = client.fetch_title("dQw4w9WgXcQ").await;
//!     println!("{title}");
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{OEmbedClient, TitleLookup};
pub use error::{OEmbedError, Result};
pub use types::{OEmbedConfig, OEmbedResponse, DEFAULT_BASE_URL, WATCH_URL};
