/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::macros::resource_common;
use crate::protocol::properties::{DocumentType, REL_SELF, ResourceKind};
use crate::protocol::resource::{Children, Resource, entries, parse_entry};
use crate::protocol::xml::Element;
use crate::protocol::{AlbumResource, Method};
use bytes::Bytes;
use futures::Stream;
use log::debug;

/// The collection of albums of a user.
///
/// Albums are loaded once, across all pages, on first access and kept until
/// invalidated. Adding or removing an album through this resource keeps the
/// loaded list in step without refetching it.
#[derive(Debug, Clone)]
pub struct AlbumListResource {
    resource: Resource,
    albums: Children<AlbumResource>,
}

resource_common!(AlbumListResource, ResourceKind::AlbumList, AlbumList);

impl AlbumListResource {
    pub(crate) fn new(resource: Resource) -> Self {
        Self {
            resource,
            albums: Children::default(),
        }
    }

    /// Returns every album, loading all pages on first call
    pub async fn albums(&mut self) -> Result<&[AlbumResource], FotkiError> {
        let albums = self.albums.load(&self.resource, REL_SELF).await?;
        Ok(albums.as_slice())
    }

    /// Same as [`Self::albums`] but allows changing the albums, e.g. loading their photos
    pub async fn albums_mut(&mut self) -> Result<&mut [AlbumResource], FotkiError> {
        let albums = self.albums.load(&self.resource, REL_SELF).await?;
        Ok(albums.as_mut_slice())
    }

    /// Streams the albums page by page without touching the cached list
    pub fn album_entries(
        &self,
    ) -> Result<impl Stream<Item = Result<AlbumResource, FotkiError>>, FotkiError> {
        let url = self.resource.collection_url(REL_SELF)?;
        Ok(entries(self.resource.client.clone(), url))
    }

    /// True once the albums have been loaded and not invalidated since
    pub fn is_loaded(&self) -> bool {
        self.albums.is_loaded()
    }

    /// Drops the loaded albums so the next access fetches them again
    pub fn invalidate_albums(&mut self) {
        self.albums.invalidate();
    }

    /// Creates a new album with the given title and returns it
    pub async fn add_album(&mut self, title: &str) -> Result<AlbumResource, FotkiError> {
        let url = self.resource.require_link(REL_SELF)?;
        let body = Element::new_entry(title).to_bytes()?;
        let document = self
            .resource
            .client
            .send_document(Method::Post, DocumentType::Entry, url.as_str(), Some(Bytes::from(body)))
            .await?;

        let created = Element::parse(&document)
            .and_then(|node| parse_entry::<AlbumResource>(self.resource.client.clone(), url, node));
        match created {
            Ok(album) => {
                self.albums.push_if_loaded(album.clone());
                Ok(album)
            }
            Err(err) => {
                // The album exists on the service but cannot be cached
                self.albums.invalidate();
                Err(err)
            }
        }
    }

    /// Deletes the first album with exactly this title.
    ///
    /// Returns false, without any request, if no album has this title.
    pub async fn remove_album(&mut self, title: &str) -> Result<bool, FotkiError> {
        let albums = self.albums.load(&self.resource, REL_SELF).await?;
        let Some(idx) = albums.iter().position(|a| a.title() == Some(title)) else {
            debug!("no album titled \"{}\" to remove", title);
            return Ok(false);
        };
        albums[idx].destroy().await?;
        albums.remove(idx);
        Ok(true)
    }
}
