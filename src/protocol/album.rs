/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::macros::{entry_accessors, resource_common};
use crate::protocol::properties::{DocumentType, FOTKI_NS, REL_PHOTOS, ResourceKind};
use crate::protocol::resource::{Children, Resource, entries, parse_entry};
use crate::protocol::xml::Element;
use crate::protocol::{Method, PhotoResource};
use bytes::Bytes;
use futures::Stream;
use log::{debug, error};

/// A single album and its photos.
#[derive(Debug, Clone)]
pub struct AlbumResource {
    resource: Resource,
    photos: Children<PhotoResource>,
}

resource_common!(AlbumResource, ResourceKind::Album, Album);
entry_accessors!(AlbumResource);

impl AlbumResource {
    pub(crate) fn new(resource: Resource) -> Self {
        Self {
            resource,
            photos: Children::default(),
        }
    }

    /// Number of photos as reported by the album entry, without loading them
    pub fn image_count(&self) -> Option<u64> {
        let Some(node) = self.resource.node.find(FOTKI_NS, "image-count") else {
            error!("photo count not found");
            return None;
        };
        match node.attr("value").map(str::parse::<u64>) {
            Some(Ok(count)) => Some(count),
            _ => {
                error!("photo count value missing or invalid");
                None
            }
        }
    }

    /// Returns every photo, loading all pages on first call
    pub async fn photos(&mut self) -> Result<&[PhotoResource], FotkiError> {
        let photos = self.photos.load(&self.resource, REL_PHOTOS).await?;
        Ok(photos.as_slice())
    }

    /// Same as [`Self::photos`] but allows changing the photos, e.g. their titles
    pub async fn photos_mut(&mut self) -> Result<&mut [PhotoResource], FotkiError> {
        let photos = self.photos.load(&self.resource, REL_PHOTOS).await?;
        Ok(photos.as_mut_slice())
    }

    /// Streams the photos page by page without touching the cached list
    pub fn photo_entries(
        &self,
    ) -> Result<impl Stream<Item = Result<PhotoResource, FotkiError>>, FotkiError> {
        let url = self.resource.collection_url(REL_PHOTOS)?;
        Ok(entries(self.resource.client.clone(), url))
    }

    pub fn is_loaded(&self) -> bool {
        self.photos.is_loaded()
    }

    pub fn invalidate_photos(&mut self) {
        self.photos.invalidate();
    }

    /// Uploads a JPEG image and titles it.
    ///
    /// This takes two requests: the upload itself and then a PUT of the new
    /// entry carrying the title. If the second one fails the photo still exists
    /// on the service, so the loaded photo list is invalidated.
    pub async fn add_photo(
        &mut self,
        title: &str,
        image: impl Into<Bytes>,
    ) -> Result<PhotoResource, FotkiError> {
        let url = self.resource.require_link(REL_PHOTOS)?;
        let document = self
            .resource
            .client
            .send_document(Method::Post, DocumentType::Image, url.as_str(), Some(image.into()))
            .await?;

        let mut photo = match Element::parse(&document)
            .and_then(|node| parse_entry::<PhotoResource>(self.resource.client.clone(), url, node))
        {
            Ok(photo) => photo,
            Err(err) => {
                self.photos.invalidate();
                return Err(err);
            }
        };

        // TODO: send the title with the upload once the service accepts multipart bodies
        if let Err(err) = photo.set_title(title).await {
            self.photos.invalidate();
            return Err(err);
        }

        self.photos.push_if_loaded(photo.clone());
        Ok(photo)
    }

    /// Deletes the first photo with exactly this title.
    ///
    /// Returns false, without any request, if no photo has this title.
    pub async fn remove_photo(&mut self, title: &str) -> Result<bool, FotkiError> {
        let photos = self.photos.load(&self.resource, REL_PHOTOS).await?;
        let Some(idx) = photos.iter().position(|p| p.title() == Some(title)) else {
            debug!("no photo titled \"{}\" to remove", title);
            return Ok(false);
        };
        photos[idx].destroy().await?;
        photos.remove(idx);
        Ok(true)
    }
}
