//! Cold-start replay walkthrough with in-memory capabilities.
//!
//! Run with: cargo run --example replay_demo

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use push_dispatch::components::capability::{Navigator, PresentationSink};
use push_dispatch::{
    DispatchEvent, DispatchResult, DispatcherBuilder, MemoryStore, NormalizedNotification,
    RawPayload,
};

struct TerminalSink;

impl PresentationSink for TerminalSink {
    fn display(
        &self,
        notification: NormalizedNotification,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        println!(
            "[banner] {} — {}",
            notification.title, notification.body
        );
        Box::pin(async { Ok(()) })
    }
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate_to(
        &self,
        path: String,
        params: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        println!("[router] navigate to {path} with {params:?}");
        Box::pin(async { Ok(()) })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let bundle = DispatcherBuilder::new(Arc::new(TerminalNavigator))
        .with_storage(Arc::new(MemoryStore::new()))
        .with_presentation_sink(Arc::new(TerminalSink))
        .build();

    // A push lands while the app is still terminated: the banner shows and
    // the navigation intent is parked.
    let payload: RawPayload = serde_json::from_value(serde_json::json!({
        "notification": { "title": "New offer", "body": "Acme raised their bid" },
        "data": { "targetScreen": "/deal/42", "amount": "100" }
    }))?;
    let outcome = bundle
        .dispatcher
        .handle(DispatchEvent::NotificationReceived { payload })
        .await;
    println!("received while terminated: {outcome:?}");

    // Routing mounts: the parked intent replays exactly once.
    let outcome = bundle.dispatcher.handle(DispatchEvent::AppReady).await;
    println!("app ready: {outcome:?}");

    let outcome = bundle.dispatcher.handle(DispatchEvent::AppReady).await;
    println!("app ready again (slot already consumed): {outcome:?}");

    Ok(())
}
