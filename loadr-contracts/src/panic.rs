use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Runs `f` and turns a panic into its message.
///
/// A separately compiled module carries its own copy of std, and the host
/// cannot catch its panics. Generic code is instantiated in the crate that
/// calls it, so a module calling this catches its own panics before they
/// cross the boundary.
pub fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

pub fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Resolves to `Err(message)` if polling the inner future panics.
pub struct CatchPanic<F> {
    inner: Pin<Box<F>>,
}

impl<F: Future> CatchPanic<F> {
    pub fn new(future: F) -> Self {
        Self {
            inner: Box::pin(future),
        }
    }
}

impl<F: Future> Future for CatchPanic<F> {
    type Output = Result<F::Output, String>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = self.get_mut().inner.as_mut();
        match catch_panic(|| inner.poll(cx)) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(out)) => Poll::Ready(Ok(out)),
            Err(reason) => Poll::Ready(Err(reason)),
        }
    }
}

impl<F> std::fmt::Debug for CatchPanic<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatchPanic").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::task::Waker;

    #[test]
    fn catch_panic_returns_the_message() {
        assert_eq!(catch_panic(|| 7), Ok(7));
        assert_eq!(
            catch_panic(|| -> u8 { panic!("boom") }),
            Err("boom".to_string())
        );
        assert_eq!(
            catch_panic(|| -> u8 { panic!("code {}", 42) }),
            Err("code 42".to_string())
        );
    }

    #[test]
    fn catch_panic_future_resolves_to_err_on_panic() {
        let mut cx = Context::from_waker(Waker::noop());

        let mut ok = CatchPanic::new(async { 5 });
        assert_eq!(Pin::new(&mut ok).poll(&mut cx), Poll::Ready(Ok(5)));

        let mut failing = CatchPanic::new(async {
            if true {
                panic!("poll exploded");
            }
            5
        });
        assert_eq!(
            Pin::new(&mut failing).poll(&mut cx),
            Poll::Ready(Err("poll exploded".to_string()))
        );
    }
}
