/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::{
    AlbumListResource, AlbumResource, AnyResource, FotkiError, PhotoResource, ResourceKind,
    ServiceRegistry,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;

/// Service document of the authenticated user
pub const SERVICE_URL: &str = crate::protocol::DEFAULT_SERVICE_URL;

/// Id of the album list collection in the service document
pub const ALBUM_LIST_ID: &str = "album-list";

/// The albums of a user.
#[derive(Debug, Clone)]
pub struct AlbumList {
    resource: AlbumListResource,
}

impl AlbumList {
    /// Retrieves the album list of the authenticated user.
    ///
    /// `Ok(None)` if the service document does not advertise an album list.
    pub async fn get(registry: &ServiceRegistry) -> Result<Option<Self>, FotkiError> {
        Self::from_service_url(registry, SERVICE_URL).await
    }

    /// Retrieves the album list advertised by the service document at `url`
    pub async fn from_service_url(
        registry: &ServiceRegistry,
        url: &str,
    ) -> Result<Option<Self>, FotkiError> {
        match registry.get(url).get_resource(ALBUM_LIST_ID).await? {
            None => Ok(None),
            Some(AnyResource::AlbumList(resource)) => Ok(Some(Self::new(resource))),
            Some(other) => Err(FotkiError::UnexpectedResourceKind {
                expected: ResourceKind::AlbumList,
                found: other.kind(),
            }),
        }
    }

    pub fn new(resource: AlbumListResource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &AlbumListResource {
        &self.resource
    }

    pub fn into_resource(self) -> AlbumListResource {
        self.resource
    }

    pub async fn albums(&mut self) -> Result<Vec<Album<'_>>, FotkiError> {
        Ok(self
            .resource
            .albums_mut()
            .await?
            .iter_mut()
            .map(Album::new)
            .collect())
    }

    pub async fn add_album(&mut self, title: &str) -> Result<AlbumResource, FotkiError> {
        self.resource.add_album(title).await
    }

    pub async fn remove_album(&mut self, title: &str) -> Result<bool, FotkiError> {
        self.resource.remove_album(title).await
    }
}

/// An album borrowed from an [`AlbumList`].
#[derive(Debug)]
pub struct Album<'a> {
    resource: &'a mut AlbumResource,
}

impl<'a> Album<'a> {
    pub fn new(resource: &'a mut AlbumResource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &AlbumResource {
        &*self.resource
    }

    pub fn title(&self) -> Option<&str> {
        self.resource.title()
    }

    pub fn image_count(&self) -> Option<u64> {
        self.resource.image_count()
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.resource.published()
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.resource.updated()
    }

    pub async fn set_title(&mut self, title: &str) -> Result<(), FotkiError> {
        self.resource.set_title(title).await
    }

    pub async fn photos(&mut self) -> Result<Vec<Photo<'_>>, FotkiError> {
        Ok(self
            .resource
            .photos_mut()
            .await?
            .iter_mut()
            .map(Photo::new)
            .collect())
    }

    pub async fn add_photo(
        &mut self,
        title: &str,
        image: impl Into<Bytes>,
    ) -> Result<PhotoResource, FotkiError> {
        self.resource.add_photo(title, image).await
    }

    pub async fn remove_photo(&mut self, title: &str) -> Result<bool, FotkiError> {
        self.resource.remove_photo(title).await
    }
}

impl fmt::Display for Album<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Album \"{}\">", self.title().unwrap_or_default())
    }
}

/// A photo borrowed from an [`Album`].
#[derive(Debug)]
pub struct Photo<'a> {
    resource: &'a mut PhotoResource,
}

impl<'a> Photo<'a> {
    pub fn new(resource: &'a mut PhotoResource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &PhotoResource {
        &*self.resource
    }

    pub fn title(&self) -> Option<&str> {
        self.resource.title()
    }

    pub fn size(&self) -> Option<u64> {
        self.resource.size()
    }

    pub async fn set_title(&mut self, title: &str) -> Result<(), FotkiError> {
        self.resource.set_title(title).await
    }

    /// Downloads the image body. Not cached.
    pub async fn image(&self) -> Result<Option<Bytes>, FotkiError> {
        self.resource.content().await
    }
}

impl fmt::Display for Photo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Photo \"{}\">", self.title().unwrap_or_default())
    }
}
