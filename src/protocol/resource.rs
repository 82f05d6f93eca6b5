/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::properties::{
    ATOM_NS, DocumentType, REL_EDIT, REL_NEXT, REL_SELF, RECENTLY_PUBLISHED, ResourceKind,
};
use crate::protocol::xml::Element;
use crate::protocol::{AlbumListResource, AlbumResource, Client, Method, PhotoResource};
use async_stream::try_stream;
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use futures::{Stream, TryStreamExt};
use log::{debug, error, warn};
use url::Url;

// Format of published/updated timestamps
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single entry or feed returned by the service.
///
/// The kind is determined once from the atom id when the resource is created.
/// Links are resolved against `base`, the URL of the document the node came from.
#[derive(Debug, Clone)]
pub struct Resource {
    pub(crate) client: Client,
    pub(crate) node: Element,
    base: Url,
    kind: ResourceKind,
}

impl Resource {
    /// Wraps a node parsed from the document at `base`, determining its kind from the atom id
    pub fn from_node(client: Client, base: Url, node: Element) -> Result<Self, FotkiError> {
        let kind = ResourceKind::of(&node).inspect_err(|err| error!("{}", err))?;
        Ok(Self {
            client,
            node,
            base,
            kind,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn node(&self) -> &Element {
        &self.node
    }

    /// URL of the document this resource was read from
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The `href` of the link with the given relation, as written in the document
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.node.link_href(rel)
    }

    /// Resolves `href` against the document this resource was read from
    pub fn resolve(&self, href: &str) -> Result<Url, FotkiError> {
        Ok(self.base.join(href)?)
    }

    pub(crate) fn require_link(&self, rel: &str) -> Result<Url, FotkiError> {
        let href = self.link(rel).ok_or_else(|| {
            error!("{} link \"{}\" not found", self.kind, rel);
            FotkiError::LinkNotFound(rel.to_string())
        })?;
        self.resolve(href)
    }

    // URL of the first page listing the members behind `rel`
    pub(crate) fn collection_url(&self, rel: &str) -> Result<Url, FotkiError> {
        let mut url = self.require_link(rel)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url.join(RECENTLY_PUBLISHED)?)
    }

    pub fn title(&self) -> Option<&str> {
        match self.node.find(ATOM_NS, "title") {
            Some(node) => Some(node.text()),
            None => {
                error!("{} title not found", self.kind);
                None
            }
        }
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.timestamp("published")
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.timestamp("updated")
    }

    /// The atom id of this resource
    pub fn remote_id(&self) -> Option<&str> {
        match self.node.find(ATOM_NS, "id") {
            Some(node) => Some(node.text()),
            None => {
                error!("{} id not found", self.kind);
                None
            }
        }
    }

    fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        let Some(node) = self.node.find(ATOM_NS, name) else {
            error!("{} {} date not found", self.kind, name);
            return None;
        };
        parse_datetime(node.text())
            .inspect_err(|err| error!("{} {} date \"{}\" invalid: {}", self.kind, name, node.text(), err))
            .ok()
    }

    /// Deletes this resource on the service
    pub async fn destroy(&self) -> Result<(), FotkiError> {
        let url = self.require_link(REL_SELF)?;
        self.client
            .send_document(Method::Delete, DocumentType::Entry, url.as_str(), None)
            .await?;
        Ok(())
    }

    /// Changes the title and sends the whole entry back to the edit link.
    ///
    /// Any other local changes to the entry are sent along with it.
    pub async fn set_title(&mut self, title: &str) -> Result<(), FotkiError> {
        let url = self.require_link(REL_EDIT)?;
        match self.node.find_mut(ATOM_NS, "title") {
            Some(node) => node.set_text(title),
            None => {
                let mut node = Element::new(Some(ATOM_NS), "title");
                node.set_text(title);
                self.node.push_child(node);
            }
        }
        let body = self.node.to_bytes()?;
        self.client
            .send_document(Method::Put, DocumentType::Entry, url.as_str(), Some(Bytes::from(body)))
            .await?;
        Ok(())
    }
}

pub(crate) fn parse_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map(|dt| dt.and_utc())
}

/// Resource types that can appear as members of a collection
pub trait FromEntry: Sized {
    const KIND: ResourceKind;

    fn from_resource(resource: Resource) -> Self;
}

/// Builds a resource of type `C` from an entry, failing if the entry is some other kind
pub(crate) fn parse_entry<C: FromEntry>(
    client: Client,
    base: Url,
    node: Element,
) -> Result<C, FotkiError> {
    let resource = Resource::from_node(client, base, node)?;
    if resource.kind() != C::KIND {
        return Err(FotkiError::UnexpectedResourceKind {
            expected: C::KIND,
            found: resource.kind(),
        });
    }
    Ok(C::from_resource(resource))
}

/// Streams the members of a collection, following `next` links until a page has none.
///
/// Entries that are not of kind `C` are logged and skipped.
pub(crate) fn entries<C: FromEntry>(
    client: Client,
    first_page: Url,
) -> impl Stream<Item = Result<C, FotkiError>> {
    try_stream! {
        let mut page_url = first_page;
        loop {
            let page = client.get_element(page_url.as_str()).await?;
            let next_page = page
                .link_href(REL_NEXT)
                .map(|href| page_url.join(href))
                .transpose()?;

            for node in page.into_children_named(ATOM_NS, "entry") {
                match parse_entry::<C>(client.clone(), page_url.clone(), node) {
                    Ok(item) => yield item,
                    Err(err) => warn!("skipping entry on {}: {}", page_url, err),
                }
            }

            match next_page {
                Some(url) => page_url = url,
                None => break,
            }
        }
    }
}

/// Cached members of a collection resource.
///
/// Loading needs `&mut`, so at most one load of a given cache can be in flight.
#[derive(Debug, Clone)]
pub enum Children<C> {
    Unloaded,
    Loaded(Vec<C>),
    Invalidated,
}

impl<C> Default for Children<C> {
    fn default() -> Self {
        Children::Unloaded
    }
}

impl<C: FromEntry> Children<C> {
    /// Returns the cached members, loading every page behind `rel` on first use
    pub(crate) async fn load(
        &mut self,
        resource: &Resource,
        rel: &str,
    ) -> Result<&mut Vec<C>, FotkiError> {
        // Returns on the first pass when already loaded, on the second otherwise
        loop {
            if let Children::Loaded(items) = self {
                return Ok(items);
            }
            if matches!(self, Children::Invalidated) {
                debug!("reloading invalidated {} members of {}", rel, resource.kind());
            }
            let url = resource.collection_url(rel)?;
            let items: Vec<C> = entries(resource.client.clone(), url).try_collect().await?;
            debug!("loaded {} {} members of {}", items.len(), rel, resource.kind());
            *self = Children::Loaded(items);
        }
    }
}

impl<C> Children<C> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Children::Loaded(_))
    }

    /// Keeps an already loaded cache in step with a member created on the service
    pub(crate) fn push_if_loaded(&mut self, item: C) {
        if let Children::Loaded(items) = self {
            items.push(item);
        }
    }

    /// Forces the next access to reload from the service
    pub(crate) fn invalidate(&mut self) {
        if self.is_loaded() {
            *self = Children::Invalidated;
        }
    }
}

/// Any resource the service can return, as determined by its atom id
#[derive(Debug, Clone)]
pub enum AnyResource {
    AlbumList(AlbumListResource),
    Album(AlbumResource),
    Photo(PhotoResource),
}

impl AnyResource {
    /// Wraps an entry or feed parsed from the document at `base` in the resource type matching its kind
    pub fn from_node(client: Client, base: Url, node: Element) -> Result<Self, FotkiError> {
        let resource = Resource::from_node(client, base, node)?;
        Ok(match resource.kind() {
            ResourceKind::AlbumList => Self::AlbumList(AlbumListResource::from_resource(resource)),
            ResourceKind::Album => Self::Album(AlbumResource::from_resource(resource)),
            ResourceKind::Photo => Self::Photo(PhotoResource::from_resource(resource)),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::AlbumList(_) => ResourceKind::AlbumList,
            Self::Album(_) => ResourceKind::Album,
            Self::Photo(_) => ResourceKind::Photo,
        }
    }
}
