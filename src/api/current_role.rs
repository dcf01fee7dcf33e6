//! Current role service
//!
//! Get the role of the caller from the `X-Portal-Role` header, the portal trusts the identity
//! provider in front of it to set it

use std::iter;
use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers;
use axum_extra::headers::Header;
use axum_extra::typed_header::TypedHeaderRejectionReason;

use crate::api::Error;
use crate::roles::Role;

/// Name of the role header
pub static X_PORTAL_ROLE: HeaderName = HeaderName::from_static("x-portal-role");

/// Typed `X-Portal-Role` header
#[derive(Clone, Copy, Debug)]
pub struct PortalRole(Role);

impl Header for PortalRole {
    fn name() -> &'static HeaderName {
        &X_PORTAL_ROLE
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Role>().ok())
            .map(PortalRole)
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        values.extend(iter::once(HeaderValue::from_static(self.0.as_str())));
    }
}

/// Current role service
#[derive(Clone, Copy, Debug)]
pub struct CurrentRole {
    /// The actual role
    role: Role,
}

impl Deref for CurrentRole {
    type Target = Role;

    fn deref(&self) -> &Self::Target {
        &self.role
    }
}

impl<S> FromRequestParts<S> for CurrentRole
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(PortalRole(role)) =
            TypedHeader::<PortalRole>::from_request_parts(parts, state)
                .await
                .map_err(|err| match err.reason() {
                    TypedHeaderRejectionReason::Missing => Error::forbidden("Missing portal role"),
                    _ => Error::forbidden("Unknown portal role"),
                })?;

        Ok(CurrentRole { role })
    }
}
