//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types exchanged with the storefront backend and
//! the client-side state that lives only on the device:
//! - `client` - HTTP services, stores, and fetch hooks
//! - `cli` - Command-line driver for the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! HTTP clients, no async. Cart totals, wishlist moves and search filtering
//! live here so they can be tested without a backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`catalog`] - Products, categories, and brands as returned by the backend
//! - [`account`] - Users and orders
//! - [`cart`] - Client-side shopping cart
//! - [`wishlist`] - Client-side wishlist
//! - [`search`] - Substring search and category selection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod catalog;
pub mod search;
pub mod types;
pub mod wishlist;

pub use account::*;
pub use cart::{Cart, CartItem, CartLineKey};
pub use catalog::*;
pub use search::{filter_by_category, search_products, toggle_category};
pub use types::*;
pub use wishlist::{Wishlist, WishlistError, WishlistItem};
