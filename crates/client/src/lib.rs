//! Shopfront Client library.
//!
//! Everything the storefront screens need to talk to the REST backend,
//! layered leaf-first:
//!
//! - [`endpoints`] - Logical operation → URL + method registry
//! - [`http`] - Anonymous and bearer-attaching HTTP clients, token stores
//! - [`services`] - One service per backend resource
//! - [`store`] - Explicit state containers with request sequencing
//! - [`hooks`] - Fetch orchestration tying stores to services
//! - [`state`] - The `Shopfront` handle that wires it all together
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ClientConfig, Shopfront};
//!
//! let shopfront = Shopfront::new(ClientConfig::from_env()?)?;
//! let products = shopfront.products_hook();
//! products.mount().await;
//! println!("{} products", products.snapshot().items.len());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod endpoints;
pub mod error;
pub mod hooks;
pub mod http;
pub mod services;
pub mod state;
pub mod store;

pub use config::{ClientConfig, ConfigError};
pub use endpoints::{Endpoint, Endpoints};
pub use error::{ClientError, Result};
pub use hooks::{CategoriesHook, ProductsHook};
pub use http::{
    ACCESS_TOKEN_KEY, ApiClient, FileTokenStore, HttpClient, MemoryTokenStore, TokenStore,
    TokenStoreError,
};
pub use state::Shopfront;
pub use store::{
    CategoryStore, FetchOutcome, FetchState, ProductStore, RequestTicket, Store, StoreAction,
};
