// Linux presentation sink over the org.freedesktop.Notifications D-Bus
// service. Desktop notification daemons need no explicit authorization; a
// missing session bus simply reads as a presentation failure, which the
// dispatcher logs and swallows.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::OnceCell;
use zbus::{Connection, Result as ZbusResult, proxy};

use crate::components::capability::PresentationSink;
use crate::components::{DispatchError, DispatchResult, NormalizedNotification};

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Send a notification to the desktop notification daemon.
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> ZbusResult<u32>;
}

pub struct DbusSink {
    app_name: String,
    connection: Arc<OnceCell<Connection>>,
}

impl DbusSink {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            connection: Arc::new(OnceCell::new()),
        }
    }

    async fn connection(&self) -> ZbusResult<&Connection> {
        self.connection.get_or_try_init(Connection::session).await
    }

    fn failure(error: impl std::fmt::Display) -> DispatchError {
        DispatchError::PresentationFailure {
            message: error.to_string(),
        }
    }
}

impl PresentationSink for DbusSink {
    fn display(
        &self,
        notification: NormalizedNotification,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        Box::pin(async move {
            let connection = self.connection().await.map_err(Self::failure)?;
            let notifications = NotificationsProxy::new(connection)
                .await
                .map_err(Self::failure)?;

            let native_id = notifications
                .notify(
                    &self.app_name,
                    0,
                    "",
                    &notification.title,
                    &notification.body,
                    Vec::new(),
                    HashMap::new(),
                    -1,
                )
                .await
                .map_err(Self::failure)?;

            tracing::debug!(native_id, "notification displayed via D-Bus");
            Ok(())
        })
    }
}
