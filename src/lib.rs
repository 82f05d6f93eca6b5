/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Fotki
//!
//! Client library for the Yandex.Fotki photo hosting AtomPub interface.
//!
//! ## Features
//!
//! - Service document discovery
//! - Album list
//!     - List albums (all pages)
//!     - Create and delete albums
//! - Album information
//!     - Title, photo count, publication dates
//!     - List, upload and delete photos
//! - Photo information
//!     - Title (can be changed), size, publication dates
//!     - Download the image
//! - Lower level [`protocol`] interface over the raw Atom documents, with a
//!   pluggable [`protocol::Transport`]
//!
//! *Obtaining the OAuth token is left up to the consumer of this library*
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fotki::models::AlbumList;
//! use fotki::protocol::{Client, Creds, FotkiError, ServiceRegistry};
//!
//! async fn print_albums(token: &str) -> Result<(), FotkiError> {
//!     // One registry per application, shared by everything talking to the service
//!     let registry = ServiceRegistry::new(Client::new(Creds::from_token(token)));
//!
//!     let Some(mut album_list) = AlbumList::get(&registry).await? else {
//!         println!("No album list advertised");
//!         return Ok(());
//!     };
//!
//!     for mut album in album_list.albums().await? {
//!         println!("{} ({} photos)", album, album.image_count().unwrap_or_default());
//!         for photo in album.photos().await? {
//!             println!("    {}", photo);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod models;
pub mod protocol;
