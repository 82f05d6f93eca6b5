/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Methods shared by every typed resource. The type must have a `resource: Resource` field
// and a `new(Resource) -> Self` constructor.
macro_rules! resource_common {
    ( $t:ty, $kind:expr, $variant:ident) => {
        impl $t {
            /// The underlying resource
            pub fn resource(&self) -> &$crate::protocol::Resource {
                &self.resource
            }

            pub fn kind(&self) -> $crate::protocol::ResourceKind {
                self.resource.kind()
            }

            /// The `href` of the link with the given relation, if present
            pub fn link(&self, rel: &str) -> Option<&str> {
                self.resource.link(rel)
            }

            /// Deletes this resource on the service
            pub async fn destroy(&self) -> Result<(), $crate::protocol::FotkiError> {
                self.resource.destroy().await
            }
        }

        impl $crate::protocol::FromEntry for $t {
            const KIND: $crate::protocol::ResourceKind = $kind;

            fn from_resource(resource: $crate::protocol::Resource) -> Self {
                Self::new(resource)
            }
        }

        impl TryFrom<$crate::protocol::AnyResource> for $t {
            type Error = $crate::protocol::FotkiError;

            fn try_from(value: $crate::protocol::AnyResource) -> Result<Self, Self::Error> {
                match value {
                    $crate::protocol::AnyResource::$variant(v) => Ok(v),
                    other => Err($crate::protocol::FotkiError::UnexpectedResourceKind {
                        expected: $kind,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

// Title and timestamps of album and photo entries
macro_rules! entry_accessors {
    ( $t:ty ) => {
        impl $t {
            /// Title of this entry, `None` (and logged) if the entry has none
            pub fn title(&self) -> Option<&str> {
                self.resource.title()
            }

            /// Changes the title on the service with a PUT of the full entry
            pub async fn set_title(&mut self, title: &str) -> Result<(), $crate::protocol::FotkiError> {
                self.resource.set_title(title).await
            }

            pub fn published(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.resource.published()
            }

            pub fn updated(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.resource.updated()
            }
        }
    };
}

pub(crate) use {entry_accessors, resource_common};
