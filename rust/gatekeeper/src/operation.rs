use crate::{Arguments, ConditionalSend, ConditionalSync};
use async_trait::async_trait;
use std::future::Future;

/// An async operation invoked with an optional payload and named arguments.
///
/// This is the calling convention guards understand. A
/// [`Protected`](crate::Protected) operation implements it too, so guarded
/// operations can be passed wherever the unguarded one was accepted.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Operation<P: ConditionalSend + 'static>: ConditionalSync {
    /// What the operation produces, including any error it reports.
    type Output: ConditionalSend;

    /// Run the operation.
    async fn call(&self, payload: Option<P>, arguments: Arguments) -> Self::Output;
}

/// An [`Operation`] backed by a closure. Created with [`operation_fn`].
#[derive(Debug, Clone, Copy)]
pub struct OperationFn<F>(F);

/// Turn an async closure into an [`Operation`].
///
/// ```
/// use gatekeeper::{Arguments, Operation, operation_fn};
/// use serde_json::Value;
///
/// # async fn example() {
/// let count = operation_fn(|_payload: Option<Value>, arguments: Arguments| async move {
///     arguments.len()
/// });
/// assert_eq!(count.call(None, Arguments::new().with("page", 1)).await, 1);
/// # }
/// ```
pub fn operation_fn<F>(operation: F) -> OperationFn<F> {
    OperationFn(operation)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<P, F, Fut> Operation<P> for OperationFn<F>
where
    P: ConditionalSend + 'static,
    F: Fn(Option<P>, Arguments) -> Fut + ConditionalSync,
    Fut: Future + ConditionalSend + 'static,
    Fut::Output: ConditionalSend,
{
    type Output = Fut::Output;

    async fn call(&self, payload: Option<P>, arguments: Arguments) -> Self::Output {
        (self.0)(payload, arguments).await
    }
}
