/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::protocol::ResourceKind;
use quick_xml::events::attributes::AttrError;
use std::io;
use std::str::Utf8Error;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum FotkiError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] AttrError),

    #[error("Document is not valid UTF-8")]
    Encoding(#[from] Utf8Error),

    #[error("HTTP status {0} returned for: {1}")]
    HttpStatus(u16, String),

    #[error("Document has no root element")]
    DocumentEmpty(),

    #[error("Resource id expected but not found")]
    ResourceIdMissing(),

    #[error("Unknown resource type \"{0}\"")]
    UnknownResourceKind(String),

    #[error("Expected a {expected:?} resource, found {found:?}")]
    UnexpectedResourceKind {
        expected: ResourceKind,
        found: ResourceKind,
    },

    #[error("Link with rel=\"{0}\" not found")]
    LinkNotFound(String),

    #[error("Invalid configuration value for {0}: {1}")]
    Config(&'static str, String),
}
