/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use fotki::protocol::{
    AlbumListResource, Client, DocumentType, FotkiError, Method, Request, ServiceRegistry,
    Transport,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

pub const SERVICE: &str = "http://fotki.test/api/me/";
pub const ALBUMS: &str = "http://fotki.test/api/users/tester/albums/";
pub const ALBUMS_PAGE_1: &str = "http://fotki.test/api/users/tester/albums/rpublished/";
pub const ALBUMS_PAGE_2: &str = "http://fotki.test/api/users/tester/albums/rpublished/page2/";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub content_type: Option<DocumentType>,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
}

/// Transport answering from canned responses and recording every request
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Vec<u8>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        init_logging();
        Arc::new(Self::default())
    }

    pub fn route(&self, method: Method, url: &str, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), body.into());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    pub fn count_method(&self, method: Method) -> usize {
        self.requests().iter().filter(|r| r.method == method).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: Request) -> Result<Bytes, FotkiError> {
        let url = request.url.to_string();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: url.clone(),
            content_type: request.content_type,
            body: request.body,
        });
        match self.routes.lock().unwrap().get(&(request.method, url.clone())) {
            Some(body) => Ok(Bytes::from(body.clone())),
            None => Err(FotkiError::HttpStatus(404, url)),
        }
    }
}

pub fn client(transport: &Arc<MockTransport>) -> Client {
    Client::with_transport(transport.clone())
}

/// Document URL for entries built directly in a test
pub fn base() -> Url {
    Url::parse(ALBUMS).unwrap()
}

pub fn service_document() -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<app:service xmlns:app="http://www.w3.org/2007/app" xmlns:atom="http://www.w3.org/2005/Atom">
  <app:workspace>
    <atom:title>tester on Yandex.Fotki</atom:title>
    <app:collection href="{ALBUMS}" id="album-list">
      <atom:title>All albums</atom:title>
    </app:collection>
    <app:collection href="http://fotki.test/api/users/tester/photos/" id="photo-list">
      <atom:title>All photos</atom:title>
    </app:collection>
  </app:workspace>
</app:service>"#
    )
}

pub fn album_url(n: u32) -> String {
    format!("http://fotki.test/api/users/tester/album/{n}/")
}

pub fn album_photos_url(n: u32) -> String {
    format!("http://fotki.test/api/users/tester/album/{n}/photos/")
}

pub fn album_photos_page(n: u32) -> String {
    format!("http://fotki.test/api/users/tester/album/{n}/photos/rpublished/")
}

pub fn photo_url(n: u32) -> String {
    format!("http://fotki.test/api/users/tester/photo/{n}/")
}

pub fn image_url(n: u32) -> String {
    format!("http://img.fotki.test/get/{n}/orig")
}

/// An album entry as it appears inside a feed
pub fn album_entry(n: u32, title: &str, image_count: u64) -> String {
    let url = album_url(n);
    let photos = album_photos_url(n);
    format!(
        r#"<entry>
    <id>urn:yandex:fotki:tester:album:{n}</id>
    <author><name>tester</name></author>
    <title>{title}</title>
    <published>2012-03-01T10:00:00Z</published>
    <updated>2012-03-02T11:30:15Z</updated>
    <link href="{url}" rel="self"/>
    <link href="{url}" rel="edit"/>
    <link href="{photos}" rel="photos"/>
    <f:image-count value="{image_count}"/>
  </entry>"#
    )
}

/// A photo entry as it appears inside a feed
pub fn photo_entry(n: u32, title: &str) -> String {
    let url = photo_url(n);
    let image = image_url(n);
    let orig_size = n * 1000 + 1;
    format!(
        r#"<entry>
    <id>urn:yandex:fotki:tester:photo:{n}</id>
    <title>{title}</title>
    <published>2012-04-01T08:00:00Z</published>
    <updated>2012-04-01T08:05:00Z</updated>
    <link href="{url}" rel="self"/>
    <link href="{url}" rel="edit"/>
    <f:img href="{image}_XL" size="XL" bytesize="500"/>
    <f:img href="{image}" size="orig" bytesize="{orig_size}"/>
    <content src="{image}" type="image/jpeg"/>
  </entry>"#
    )
}

/// An entry returned on its own, declaring its namespaces itself
pub fn standalone(entry: &str) -> String {
    entry.replacen(
        "<entry>",
        r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:f="yandex:fotki">"#,
        1,
    )
}

pub fn feed(id: &str, self_href: &str, entries: &[String], next: Option<&str>) -> String {
    let next = next
        .map(|href| format!(r#"<link href="{href}" rel="next"/>"#))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:app="http://www.w3.org/2007/app" xmlns:f="yandex:fotki">
  <id>{id}</id>
  <title>tester</title>
  <updated>2012-04-01T08:05:00Z</updated>
  <link href="{self_href}" rel="self"/>
  {next}
  {}
</feed>"#,
        entries.join("\n  ")
    )
}

pub fn album_list_feed() -> String {
    feed("urn:yandex:fotki:tester:albums", ALBUMS, &[], None)
}

/// Routes the service document and the album list collection
pub fn mock_service(transport: &MockTransport) {
    transport.route(Method::Get, SERVICE, service_document());
    transport.route(Method::Get, ALBUMS, album_list_feed());
}

/// Routes a single page of albums with the given titles, numbered from 1
pub fn mock_album_page(transport: &MockTransport, titles: &[&str]) {
    let entries: Vec<String> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| album_entry(i as u32 + 1, title, 0))
        .collect();
    transport.route(
        Method::Get,
        ALBUMS_PAGE_1,
        feed("urn:yandex:fotki:tester:albums", ALBUMS, &entries, None),
    );
}

/// Routes a single page of photos of album `n`, numbered from 1
pub fn mock_photo_page(transport: &MockTransport, n: u32, titles: &[&str]) {
    let entries: Vec<String> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| photo_entry(i as u32 + 1, title))
        .collect();
    transport.route(
        Method::Get,
        &album_photos_page(n),
        feed(
            &format!("urn:yandex:fotki:tester:album:{n}:photos"),
            &album_photos_url(n),
            &entries,
            None,
        ),
    );
}

pub async fn album_list(transport: &Arc<MockTransport>) -> AlbumListResource {
    mock_service(transport);
    let registry = ServiceRegistry::new(client(transport));
    registry
        .get(SERVICE)
        .get_resource("album-list")
        .await
        .unwrap()
        .unwrap()
        .try_into()
        .unwrap()
}
