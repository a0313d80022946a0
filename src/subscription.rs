//! Background product fetches tied to the lifetime of a view.
//!
//! A [`Subscription`] owns the task running one fetch. Cancelling or dropping
//! it aborts the task, so an abandoned request never reports back.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ProductClient;
use crate::error::FetchError;
use crate::event::Event;
use crate::product::Product;

/// Outcome of one fetch, tagged with the ticket it was started under.
#[derive(Debug)]
pub struct ProductsLoaded {
    pub ticket: u64,
    pub result: Result<Vec<Product>, FetchError>,
}

#[derive(Debug)]
pub struct Subscription {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!(ticket = self.ticket, "cancelling product fetch");
            self.handle.abort();
        }
    }
}

/// Start fetching products and deliver the outcome as [`Event::Loaded`].
pub fn subscribe(
    client: ProductClient,
    ticket: u64,
    tx: mpsc::UnboundedSender<Event>,
) -> Subscription {
    let handle = tokio::spawn(async move {
        let result = client.fetch_products().await;
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(Event::Loaded(ProductsLoaded { ticket, result }));
    });

    Subscription { ticket, handle }
}
