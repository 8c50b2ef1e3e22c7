//! View scopes
//!
//! Every view owns a [`ViewScope`]. All of the view's remote calls run
//! through it, and once the scope is closed (explicitly, by dropping the
//! view, or through a cancelled parent token) pending calls resolve to
//! [`ClientError::Cancelled`] so their results are never applied.

use std::future::Future;

use shop_client::{ClientError, ClientResult};
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Debug)]
pub struct ViewScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::from_token(CancellationToken::new())
    }

    /// Scope that also closes when `parent` is cancelled
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self::from_token(parent.child_token())
    }

    fn from_token(token: CancellationToken) -> Self {
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    /// Handle for closing the scope from elsewhere (e.g. a signal handler)
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `call` unless the scope closes first.
    pub async fn run<F, T>(&self, call: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ClientError::Cancelled),
            result = call => result,
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
