//! Runtime bridge between UI command queue and backend event intake.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Connection settings the backend worker needs before it can serve commands.
#[derive(Clone)]
pub struct BridgeConfig {
    pub server_url: Url,
    pub request_timeout: Duration,
}

pub fn launch(config: BridgeConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    crate::ui::app::start_backend_bridge(config, cmd_rx, ui_tx);
}
