//! Which methods each path shape accepts.
//!
//! | Path                        | Methods                                    |
//! |-----------------------------|--------------------------------------------|
//! | `/{collection}`             | GET, POST                                  |
//! | `/{collection}/{id}`        | GET, PUT, DELETE (GET, DELETE for photos and sessions) |
//! | `/{collection}/{id}/{field}`| GET (users and sessions only)              |
//! | `/sites/{id}/photos`        | GET                                        |
//! | `/photos/{id}/image`        | GET                                        |
//!
//! HEAD is served wherever GET is. Anything else on a mounted path is
//! answered with 405.

use tide::http::Method;
use tide::{Request, Response};

use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Sites,
    Photos,
    Users,
    Sessions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Collection,
    Item,
    Field,
    /// Photos attached to a site.
    Photos,
    /// Raw image of a photo.
    Image,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Sites,
        Resource::Photos,
        Resource::Users,
        Resource::Sessions,
    ];

    pub fn collection(self) -> &'static str {
        match self {
            Resource::Sites => "sites",
            Resource::Photos => "photos",
            Resource::Users => "users",
            Resource::Sessions => "sessions",
        }
    }

    /// Whether single attributes of an item can be read on their own.
    pub fn has_fields(self) -> bool {
        matches!(self, Resource::Users | Resource::Sessions)
    }

    /// Route pattern for `shape`, or `None` when this resource doesn't expose it.
    pub fn path(self, shape: Shape) -> Option<String> {
        match shape {
            Shape::Collection => Some(format!("/{}", self.collection())),
            Shape::Item => Some(format!("/{}/:id", self.collection())),
            Shape::Field if self.has_fields() => Some(format!("/{}/:id/:field", self.collection())),
            Shape::Field => None,
            Shape::Photos if self == Resource::Sites => Some("/sites/:id/photos".to_string()),
            Shape::Image if self == Resource::Photos => Some("/photos/:id/image".to_string()),
            Shape::Photos | Shape::Image => None,
        }
    }
}

pub fn allowed_methods(resource: Resource, shape: Shape) -> &'static [Method] {
    match (resource, shape) {
        (_, Shape::Collection) => &[Method::Get, Method::Post],
        (Resource::Sites | Resource::Users, Shape::Item) => &[Method::Get, Method::Put, Method::Delete],
        (Resource::Photos | Resource::Sessions, Shape::Item) => &[Method::Get, Method::Delete],
        (Resource::Users | Resource::Sessions, Shape::Field) => &[Method::Get],
        (Resource::Sites, Shape::Photos) | (Resource::Photos, Shape::Image) => &[Method::Get],
        (_, Shape::Field | Shape::Photos | Shape::Image) => &[],
    }
}

/// Registers the catch-all that rejects every method the shape doesn't allow.
///
/// Tide prefers a method-specific endpoint over a catch-all on the same path,
/// so this only fires for methods without a handler.
pub(super) fn reject_other_methods(
    route: &mut tide::Route<'_, crate::State>,
    resource: Resource,
    shape: Shape,
) {
    route.all(move |req: Request<crate::State>| async move {
        method_not_allowed(&req, resource, shape)
    });
}

fn method_not_allowed(
    req: &Request<crate::State>,
    resource: Resource,
    shape: Shape,
) -> tide::Result<Response> {
    Err(tide::Error::from(ApiError::MethodNotAllowed {
        method: req.method(),
        path: req.url().path().to_string(),
        allowed: allowed_methods(resource, shape),
    }))
}
