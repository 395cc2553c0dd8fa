//! Operation trait: the asynchronous function a tracker wraps.
//!
//! Closures of the shape `Fn(P) -> impl Future<Output = Result<T, E>>` are
//! operations out of the box. Multi-argument operations take a tuple.

use std::fmt::Display;
use std::future::Future;

use async_trait::async_trait;

/// An asynchronous operation invoked with parameters `P`.
///
/// The error's `Display` output is what a tracker records as the failure
/// message.
#[async_trait]
pub trait Operation<P>: Send + Sync
where
    P: Send + 'static,
{
    /// Value produced when the operation resolves.
    type Output: Clone + Send + Sync + 'static;

    /// Error produced when the operation rejects.
    type Error: Display + Send + 'static;

    /// Run the operation once.
    async fn invoke(&self, params: P) -> Result<Self::Output, Self::Error>;
}

#[async_trait]
impl<P, T, E, F, Fut> Operation<P> for F
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Display + Send + 'static,
{
    type Output = T;
    type Error = E;

    async fn invoke(&self, params: P) -> Result<T, E> {
        (self)(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler;

    #[async_trait]
    impl Operation<u64> for Doubler {
        type Output = u64;
        type Error = String;

        async fn invoke(&self, params: u64) -> Result<u64, String> {
            params
                .checked_mul(2)
                .ok_or_else(|| "overflow".to_string())
        }
    }

    #[tokio::test]
    async fn test_closure_is_operation() {
        let op = |(a, b): (i32, i32)| async move { Ok::<_, String>(a + b) };
        assert_eq!(op.invoke((2, 3)).await, Ok(5));
    }

    #[tokio::test]
    async fn test_custom_operation() {
        assert_eq!(Doubler.invoke(21).await, Ok(42));
        assert_eq!(Doubler.invoke(u64::MAX).await, Err("overflow".to_string()));
    }
}
