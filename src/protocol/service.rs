/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::properties::APP_NS;
use crate::protocol::{AnyResource, Client};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

/// A service document and the collections it advertises.
#[derive(Debug)]
pub struct Service {
    url: String,
    client: Client,
}

impl Service {
    pub fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Looks up the href of the collection with the given id in the service document
    pub async fn resource_url(&self, resource_id: &str) -> Result<Option<Url>, FotkiError> {
        let root = self.client.get_element(&self.url).await?;
        let href = root
            .descendants(APP_NS, "collection")
            .into_iter()
            .find(|node| node.attr("id") == Some(resource_id))
            .and_then(|node| node.attr("href"));
        match href {
            Some(href) => Ok(Some(Url::parse(&self.url)?.join(href)?)),
            None => Ok(None),
        }
    }

    /// Loads the collection with the given id.
    ///
    /// Returns `Ok(None)` if the service document has no such collection. A
    /// collection document without a recognizable resource id is an error.
    pub async fn get_resource(&self, resource_id: &str) -> Result<Option<AnyResource>, FotkiError> {
        debug!("loading resource {} for service {}", resource_id, self.url);
        let Some(url) = self.resource_url(resource_id).await? else {
            debug!("service {} has no collection {}", self.url, resource_id);
            return Ok(None);
        };
        let root = self.client.get_element(url.as_str()).await?;
        AnyResource::from_node(self.client.clone(), url, root).map(Some)
    }
}

/// Hands out one [`Service`] per service URL.
///
/// Create one registry and share it; repeated calls to [`ServiceRegistry::get`]
/// with the same URL return the same instance.
#[derive(Debug)]
pub struct ServiceRegistry {
    client: Client,
    services: Mutex<HashMap<String, Arc<Service>>>,
}

impl ServiceRegistry {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            services: Mutex::new(HashMap::new()),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Returns the service for `url`, creating it on first use
    pub fn get(&self, url: &str) -> Arc<Service> {
        let mut services = self.services.lock().unwrap_or_else(PoisonError::into_inner);
        services
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(Service::new(url, self.client.clone())))
            .clone()
    }

    /// Number of distinct services handed out so far
    pub fn len(&self) -> usize {
        self.services
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
