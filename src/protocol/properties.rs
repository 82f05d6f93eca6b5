/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::xml::Element;
use std::str::FromStr;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// AtomPub namespace (service documents, collections)
pub const APP_NS: &str = "http://www.w3.org/2007/app";

/// Atom namespace (feeds, entries, links)
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Vendor extension namespace (image counts, image sizes)
pub const FOTKI_NS: &str = "yandex:fotki";

// Path appended to a collection link to list its members, newest first
pub(crate) const RECENTLY_PUBLISHED: &str = "rpublished/";

// Link relations used by the service
pub(crate) const REL_SELF: &str = "self";
pub(crate) const REL_PHOTOS: &str = "photos";
pub(crate) const REL_EDIT: &str = "edit";
pub(crate) const REL_NEXT: &str = "next";

/// Kind of a resource, taken from the 5th colon separated segment of its atom id.
///
/// e.g. `urn:yandex:fotki:someuser:album:12345` is an [`ResourceKind::Album`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum ResourceKind {
    #[strum(serialize = "albums")]
    AlbumList,
    #[strum(serialize = "album")]
    Album,
    #[strum(serialize = "photo")]
    Photo,
}

impl ResourceKind {
    const KIND_SEGMENT: usize = 4;

    /// Determines the kind of the resource described by the given entry or feed node
    pub fn of(node: &Element) -> Result<Self, FotkiError> {
        let id = node
            .find(ATOM_NS, "id")
            .ok_or(FotkiError::ResourceIdMissing())?
            .text();
        Self::from_id(id)
    }

    /// Determines the kind from a raw atom id string
    pub fn from_id(id: &str) -> Result<Self, FotkiError> {
        let tag = id
            .split(':')
            .nth(Self::KIND_SEGMENT)
            .ok_or_else(|| FotkiError::UnknownResourceKind(id.to_string()))?;
        Self::from_str(tag).map_err(|_| FotkiError::UnknownResourceKind(tag.to_string()))
    }
}

/// Type of document body sent to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum DocumentType {
    #[strum(serialize = "application/atom+xml; charset=utf-8; type=entry")]
    Entry,
    #[strum(serialize = "image/jpeg")]
    Image,
}

impl DocumentType {
    pub fn content_type(self) -> &'static str {
        self.into()
    }
}
