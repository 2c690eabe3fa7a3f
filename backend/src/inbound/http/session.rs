//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Handlers only see owner-level operations: remember the signed-in owner,
//! look them up again, forget them on sign-out.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const OWNER_ID_KEY: &str = "owner_id";

/// Newtype wrapper that exposes owner-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the signed-in owner in the session cookie.
    pub fn persist_owner(&self, owner_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(OWNER_ID_KEY, owner_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The owner stored in the session, if any.
    pub fn owner_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(OWNER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid owner id in session cookie");
                None
            }
        }))
    }

    /// Require a signed-in owner or return `401 Unauthorized`.
    pub fn require_owner(&self) -> Result<UserId, Error> {
        self.owner_id()?
            .ok_or_else(|| Error::unauthorized("sign in to manage websites"))
    }

    /// Drop everything stored in the session.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
