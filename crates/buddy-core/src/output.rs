//! Deferred values.
//!
//! An [`Output`] is a value the resource host computes at some later point
//! (identifiers, URLs, resolved integration hashes). Outputs are shared: any
//! number of consumers may hold a clone and await it, and the underlying
//! computation runs at most once.
//!
//! Each output also carries the set of resource URNs it was derived from.
//! Composing outputs with [`Output::map`] or [`all`] keeps that set, which is
//! how the host learns the dependency edges between declared resources.

use crate::error::OutputError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type SharedResult<T> = Shared<BoxFuture<'static, Result<T, OutputError>>>;

/// A shareable, lazily resolved value produced by the resource host.
pub struct Output<T> {
    inner: SharedResult<T>,
    dependencies: Arc<BTreeSet<String>>,
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            dependencies: Arc::clone(&self.dependencies),
        }
    }
}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

impl<T> Output<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap a future that produces the value.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, OutputError>> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
            dependencies: Arc::new(BTreeSet::new()),
        }
    }

    /// An output that is already known.
    pub fn resolved(value: T) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    /// An output that resolves to an error.
    pub fn failed(error: OutputError) -> Self {
        Self::new(futures::future::ready(Err(error)))
    }

    /// Record that this output derives from the resource with the given URN.
    pub fn with_dependency(mut self, urn: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.dependencies).insert(urn.into());
        self
    }

    /// Record several dependencies at once.
    pub fn with_dependencies<I>(mut self, urns: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Arc::make_mut(&mut self.dependencies).extend(urns);
        self
    }

    /// URNs of the resources this output derives from.
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    /// Transform the value once it resolves. Never blocks.
    pub fn map<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let inner = self.inner.clone();
        Output {
            inner: async move { inner.await.map(f) }.boxed().shared(),
            dependencies: Arc::clone(&self.dependencies),
        }
    }

    /// Like [`Output::map`], for transformations that can fail.
    pub fn try_map<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, OutputError> + Send + 'static,
    {
        let inner = self.inner.clone();
        Output {
            inner: async move { inner.await.and_then(f) }.boxed().shared(),
            dependencies: Arc::clone(&self.dependencies),
        }
    }

    /// Wait for the value.
    pub async fn resolve(&self) -> Result<T, OutputError> {
        self.inner.clone().await
    }

    /// The value if it has already been computed by some consumer.
    pub fn peek(&self) -> Option<Result<T, OutputError>> {
        self.inner.peek().cloned()
    }
}

/// Combine outputs into one that resolves when all of them have.
///
/// Fails with the first error encountered. The dependency set is the union
/// of the inputs' sets.
pub fn all<T>(outputs: Vec<Output<T>>) -> Output<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    let dependencies: BTreeSet<String> = outputs
        .iter()
        .flat_map(|o| o.dependencies.iter().cloned())
        .collect();
    let futures: Vec<_> = outputs.into_iter().map(|o| o.inner).collect();

    Output::new(futures::future::try_join_all(futures)).with_dependencies(dependencies)
}

/// A field value supplied by the caller: either known now or deferred.
#[derive(Debug, Clone)]
pub enum Input<T> {
    Value(T),
    Output(Output<T>),
}

impl<T> Input<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Lift the input into an output, resolving immediately for literals.
    pub fn into_output(self) -> Output<T> {
        match self {
            Input::Value(value) => Output::resolved(value),
            Input::Output(output) => output,
        }
    }

    /// The literal value, if known now.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Input::Value(value) => Some(value),
            Input::Output(_) => None,
        }
    }
}

impl<T> From<Output<T>> for Input<T> {
    fn from(output: Output<T>) -> Self {
        Input::Output(output)
    }
}

impl From<String> for Input<String> {
    fn from(value: String) -> Self {
        Input::Value(value)
    }
}

impl From<&str> for Input<String> {
    fn from(value: &str) -> Self {
        Input::Value(value.to_string())
    }
}
