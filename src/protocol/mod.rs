/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod client;
mod macros;
pub mod xml;
pub mod properties;
pub mod service;
pub mod resource;
pub mod album_list;
pub mod album;
pub mod photo;
pub mod errors;

pub use album::*;
pub use album_list::*;
pub use client::*;
pub use errors::*;
pub use photo::*;
pub use properties::{APP_NS, ATOM_NS, DocumentType, FOTKI_NS, ResourceKind};
pub use resource::{AnyResource, Children, FromEntry, Resource};
pub use service::*;
pub use xml::Element;
