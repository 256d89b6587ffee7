//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::RefreshCatalog => "refresh_catalog",
        BackendCommand::CreateProduct { .. } => "create_product",
        BackendCommand::UpdateProduct { .. } => "update_product",
        BackendCommand::DeleteProduct { .. } => "delete_product",
        BackendCommand::SelectForEdit { .. } => "select_for_edit",
        BackendCommand::CancelEdit => "cancel_edit",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup failure); restart the app"
                    .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn queued_command_leaves_status_untouched() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut status = "idle".to_string();

        dispatch_backend_command(&cmd_tx, BackendCommand::RefreshCatalog, &mut status);
        assert_eq!(status, "idle");
    }

    #[test]
    fn full_queue_reports_through_status() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut status = String::new();

        dispatch_backend_command(&cmd_tx, BackendCommand::RefreshCatalog, &mut status);
        dispatch_backend_command(&cmd_tx, BackendCommand::CancelEdit, &mut status);
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn disconnected_queue_reports_through_status() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut status = String::new();

        dispatch_backend_command(&cmd_tx, BackendCommand::RefreshCatalog, &mut status);
        assert!(status.contains("disconnected"));
    }
}
