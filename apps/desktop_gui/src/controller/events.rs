//! UI/backend events and error modeling for the desktop catalog client.

use client_core::StoreError;
use shared::domain::Product;

pub enum UiEvent {
    /// Full snapshot of the collection after a load or a confirmed mutation.
    CatalogUpdated(Vec<Product>),
    /// The edit-target changed; `None` means the form is back in create mode.
    EditTargetChanged(Option<Product>),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    /// The server answered with a non-success status.
    Rejected,
    Decode,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadCatalog,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    General,
}

impl UiErrorContext {
    fn headline(self) -> &'static str {
        match self {
            Self::BackendStartup => "Backend worker failed to start",
            Self::LoadCatalog => "Couldn't load the catalog",
            Self::CreateProduct => "Couldn't add the product",
            Self::UpdateProduct => "Couldn't update the product",
            Self::DeleteProduct => "Couldn't delete the product",
            Self::General => "Something went wrong",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_store_error(context: UiErrorContext, err: &StoreError) -> Self {
        let category = match err {
            StoreError::Transport(_) => UiErrorCategory::Transport,
            StoreError::Status { .. } => UiErrorCategory::Rejected,
            StoreError::Decode(_) => UiErrorCategory::Decode,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// For failures that never went through the store, e.g. worker startup.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("timed out")
            || lower.contains("connection")
            || lower.contains("network")
            || lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line rendition for the status bar.
    pub fn status_line(&self) -> String {
        format!("{}: {}", self.context.headline(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_connection_failures_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "connection refused while reaching the catalog backend",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unclassifiable_messages_fall_back_to_unknown() {
        let err = UiError::from_message(UiErrorContext::General, "something odd happened");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.context(), UiErrorContext::General);
        assert_eq!(err.message(), "something odd happened");
    }

    #[test]
    fn status_line_carries_the_context_headline() {
        let err = UiError::from_message(UiErrorContext::DeleteProduct, "server returned 404");
        assert!(err.status_line().starts_with("Couldn't delete the product:"));
    }
}
