use futures::channel::oneshot;

use crate::error::StoreError;
use crate::store::StoreFuture;

/// Answer slot for a store request running off the UI thread.
/// Poll it once per frame with [`oneshot::Receiver::try_recv`].
pub type Reply<T> = oneshot::Receiver<Result<T, StoreError>>;

/// Drive a store request to completion in the background
pub fn spawn_request<T: Send + 'static>(request: StoreFuture<T>) -> Reply<T> {
    let (sender, receiver) = oneshot::channel();

    #[cfg(not(target_arch = "wasm32"))]
    std::thread::spawn(move || {
        // The receiver is gone when the panel moved on to another hero
        let _ = sender.send(futures::executor::block_on(request));
    });

    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(async move {
        let _ = sender.send(request.await);
    });

    receiver
}

/// Non-blocking check of a pending reply.
///
/// `None` while the request is still running. A dropped request is
/// reported as an unavailable store.
pub fn poll_reply<T>(reply: &mut Reply<T>) -> Option<Result<T, StoreError>> {
    match reply.try_recv() {
        Ok(answer) => answer,
        Err(oneshot::Canceled) => Some(Err(StoreError::Unavailable(
            "request was dropped before answering".to_owned(),
        ))),
    }
}
