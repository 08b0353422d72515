use async_trait::async_trait;
use tracing::{error, info};

use crate::routes::Route;

/// Toast analog: transient, user-visible notifications raised by the
/// controllers. Nothing is logged durably.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Navigation sink. Controllers request a route change; whoever renders the
/// app decides what "navigating" means.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, route: Route);
}

/// Default notifier for the terminal client: prints, and traces.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        info!("{message}");
        println!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
        eprintln!("{message}");
    }
}

/// Navigation in a terminal session is informational only.
pub struct ConsoleNavigator;

#[async_trait]
impl Navigator for ConsoleNavigator {
    async fn navigate(&self, route: Route) {
        info!(path = route.path(), "navigate");
    }
}
