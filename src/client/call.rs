use futures::future::BoxFuture;
use std::fmt;
use std::future::{Future, IntoFuture};

use crate::{BoxStream, Result};

/// A deferred API call.
///
/// Nothing is sent until the call is awaited or its stream is polled, and each
/// `Call` performs at most one request. Argument validation has already run when
/// the `Call` is created; a validation failure is delivered as its result.
#[must_use = "a Call does nothing until awaited or streamed"]
pub struct Call<T> {
    fut: BoxFuture<'static, Result<T>>,
}

impl<T: Send + 'static> Call<T> {
    pub(crate) fn new<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Self { fut: Box::pin(fut) }
    }

    pub(crate) fn fail(err: crate::Error) -> Self {
        Self::new(async move { Err(err) })
    }

    pub fn map<U, F>(self, f: F) -> Call<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Call::new(async move { self.fut.await.map(f) })
    }

    pub fn and_then<U, F>(self, f: F) -> Call<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U> + Send + 'static,
    {
        Call::new(async move { self.fut.await.and_then(f) })
    }

    /// A stream that yields exactly one item, starting the request on first poll.
    pub fn into_stream(self) -> BoxStream<'static, T> {
        Box::pin(futures::stream::once(self.fut))
    }
}

impl<T> IntoFuture for Call<T> {
    type Output = Result<T>;
    type IntoFuture = BoxFuture<'static, Result<T>>;

    fn into_future(self) -> Self::IntoFuture {
        self.fut
    }
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Call(..)")
    }
}
