/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::macros::{entry_accessors, resource_common};
use crate::protocol::properties::{ATOM_NS, FOTKI_NS, ResourceKind};
use crate::protocol::resource::Resource;
use bytes::Bytes;
use log::error;

/// A single photo.
///
/// Only the entry is held; the image itself is fetched on every call to [`PhotoResource::content`].
#[derive(Debug, Clone)]
pub struct PhotoResource {
    resource: Resource,
}

resource_common!(PhotoResource, ResourceKind::Photo, Photo);
entry_accessors!(PhotoResource);

impl PhotoResource {
    pub(crate) fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// The atom id of the photo
    pub fn remote_id(&self) -> Option<&str> {
        self.resource.remote_id()
    }

    /// Size in bytes of the original image
    pub fn size(&self) -> Option<u64> {
        let Some(node) = self
            .resource
            .node
            .find_with_attr(FOTKI_NS, "img", "size", "orig")
        else {
            error!("image size value not found");
            return None;
        };
        match node.attr("bytesize").map(str::parse::<u64>) {
            Some(Ok(size)) => Some(size),
            _ => {
                error!("image size value missing or invalid");
                None
            }
        }
    }

    /// Downloads the image. `Ok(None)` if the entry has no content link.
    pub async fn content(&self) -> Result<Option<Bytes>, FotkiError> {
        let Some(src) = self
            .resource
            .node
            .find(ATOM_NS, "content")
            .and_then(|node| node.attr("src"))
        else {
            error!("attached media not found");
            return Ok(None);
        };
        let url = self.resource.resolve(src)?;
        Ok(Some(self.resource.client.get_document(url.as_str()).await?))
    }
}
