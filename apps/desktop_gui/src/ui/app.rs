//! Desktop catalog app: product list, create/edit form, and the backend
//! worker that owns the `Catalog`.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use rust_decimal::Decimal;

use client_core::{Catalog, HttpProductStore};
use shared::domain::{Product, ProductDraft};

use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime::BridgeConfig;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

/// Form fields exactly as typed, before any coercion.
#[derive(Debug, Default, Clone, PartialEq)]
struct ProductFormState {
    name: String,
    image_url: String,
    price_input: String,
}

impl ProductFormState {
    /// Resets the fields whenever the edit-target changes, including back to
    /// create mode.
    fn reset_for(&mut self, target: Option<&Product>) {
        *self = match target {
            Some(product) => Self {
                name: product.name.clone(),
                image_url: product.image_url.clone(),
                price_input: product.price.to_string(),
            },
            None => Self::default(),
        };
    }

    /// Coerces the typed fields into a draft. The price must parse as a
    /// non-negative decimal and the name must be non-empty; nothing is
    /// truncated to an integer on the way through.
    fn parse_draft(&self) -> Result<ProductDraft, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name must not be empty".to_string());
        }
        let price: Decimal = self
            .price_input
            .trim()
            .parse()
            .map_err(|_| format!("Price '{}' is not a valid number", self.price_input.trim()))?;
        if price.is_sign_negative() {
            return Err("Price must not be negative".to_string());
        }
        Ok(ProductDraft {
            name: name.to_string(),
            image_url: self.image_url.trim().to_string(),
            price,
        })
    }
}

fn format_price(price: Decimal) -> String {
    format!("${price:.2}")
}

pub struct CatalogApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    products: Vec<Product>,
    edit_target: Option<Product>,
    form: ProductFormState,

    status: String,
    last_synced: Option<DateTime<Local>>,
}

impl CatalogApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            products: Vec::new(),
            edit_target: None,
            form: ProductFormState::default(),
            status: "Connecting to catalog...".to_string(),
            last_synced: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::CatalogUpdated(products) => {
                self.products = products;
                self.last_synced = Some(Local::now());
            }
            UiEvent::EditTargetChanged(target) => {
                self.form.reset_for(target.as_ref());
                self.edit_target = target;
            }
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                self.status = err.status_line();
            }
        }
    }

    fn show_product_list(&mut self, ui: &mut egui::Ui) {
        ui.heading("Products");
        ui.add_space(4.0);

        if self.products.is_empty() {
            ui.label("No products yet.");
            return;
        }

        let mut pending: Option<BackendCommand> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for product in &self.products {
                    let being_edited = self
                        .edit_target
                        .as_ref()
                        .is_some_and(|target| target.id == product.id);
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.strong(&product.name);
                            ui.label(format!("ID: {}", product.id.0));
                            ui.label(format!("Price: {}", format_price(product.price)));
                            if !product.image_url.is_empty() {
                                ui.small(&product.image_url);
                            }
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Delete").clicked() {
                                    pending = Some(BackendCommand::DeleteProduct {
                                        product_id: product.id,
                                    });
                                }
                                if ui
                                    .add_enabled(!being_edited, egui::Button::new("Edit"))
                                    .clicked()
                                {
                                    pending = Some(BackendCommand::SelectForEdit {
                                        product_id: product.id,
                                    });
                                }
                            },
                        );
                    });
                    ui.separator();
                }
            });

        if let Some(cmd) = pending {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }

    fn show_product_form(&mut self, ui: &mut egui::Ui) {
        let editing = self.edit_target.clone();
        ui.heading(if editing.is_some() {
            "Edit Product"
        } else {
            "Add Product"
        });
        ui.add_space(4.0);

        egui::Grid::new("product_form_fields")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut self.form.name);
                ui.end_row();

                ui.label("Image URL");
                ui.text_edit_singleline(&mut self.form.image_url);
                ui.end_row();

                ui.label("Price");
                ui.text_edit_singleline(&mut self.form.price_input);
                ui.end_row();
            });
        ui.add_space(8.0);

        let mut pending: Option<BackendCommand> = None;
        ui.horizontal(|ui| {
            let submit_label = if editing.is_some() {
                "Update Product"
            } else {
                "Add Product"
            };
            if ui.button(submit_label).clicked() {
                match self.form.parse_draft() {
                    Ok(draft) => {
                        pending = Some(match &editing {
                            Some(target) => BackendCommand::UpdateProduct {
                                product_id: target.id,
                                draft,
                            },
                            None => BackendCommand::CreateProduct { draft },
                        });
                    }
                    Err(message) => {
                        self.status = message;
                    }
                }
            }
            if editing.is_some() && ui.button("Cancel").clicked() {
                pending = Some(BackendCommand::CancelEdit);
            }
        });

        if let Some(target) = &editing {
            ui.add_space(4.0);
            ui.small(format!("Editing product {}", target.id.0));
        }

        if let Some(cmd) = pending {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("catalog_header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Shop Notebook Store");
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.clone());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Refresh").clicked() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::RefreshCatalog,
                            &mut self.status,
                        );
                    }
                    if let Some(synced) = self.last_synced {
                        ui.small(format!("Last synced {}", synced.format("%H:%M:%S")));
                    }
                });
            });
        });

        egui::SidePanel::right("product_form_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                self.show_product_form(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_product_list(ui);
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Spawns the backend worker: a dedicated thread owning a tokio runtime, the
/// HTTP store, and the `Catalog`. Commands are served strictly one at a time,
/// so no two catalog mutations ever interleave. The loop ends when the UI
/// drops its command sender; event sends into a torn-down UI are discarded.
pub fn start_backend_bridge(
    config: BridgeConfig,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let store =
                match HttpProductStore::new(config.server_url.clone(), config.request_timeout) {
                    Ok(store) => store,
                    Err(err) => {
                        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                            UiErrorContext::BackendStartup,
                            format!("failed to build http client: {err}"),
                        )));
                        tracing::error!("failed to build http client: {err}");
                        return;
                    }
                };

            let mut catalog = Catalog::new();
            match catalog.load_all(&store).await {
                Ok(()) => {
                    let _ = ui_tx.try_send(UiEvent::CatalogUpdated(catalog.products().to_vec()));
                    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
                }
                Err(err) => {
                    tracing::error!(
                        server_url = %config.server_url,
                        "initial catalog load failed: {err}"
                    );
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_store_error(
                        UiErrorContext::LoadCatalog,
                        &err,
                    )));
                }
            }

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::RefreshCatalog => {
                        tracing::info!("backend: refresh_catalog");
                        match catalog.load_all(&store).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::CatalogUpdated(
                                    catalog.products().to_vec(),
                                ));
                            }
                            Err(err) => {
                                tracing::error!("backend: refresh_catalog failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_store_error(
                                    UiErrorContext::LoadCatalog,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::CreateProduct { draft } => {
                        tracing::info!(name = %draft.name, "backend: create_product");
                        match catalog.create(&store, &draft).await {
                            Ok(created) => {
                                let _ = ui_tx.try_send(UiEvent::CatalogUpdated(
                                    catalog.products().to_vec(),
                                ));
                                let _ = ui_tx.try_send(UiEvent::Info(format!(
                                    "Added '{}' (id {})",
                                    created.name, created.id.0
                                )));
                            }
                            Err(err) => {
                                tracing::error!("backend: create_product failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_store_error(
                                    UiErrorContext::CreateProduct,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::UpdateProduct { product_id, draft } => {
                        tracing::info!(product_id = product_id.0, "backend: update_product");
                        match catalog.update(&store, product_id, &draft).await {
                            Ok(updated) => {
                                let _ = ui_tx.try_send(UiEvent::CatalogUpdated(
                                    catalog.products().to_vec(),
                                ));
                                let _ = ui_tx.try_send(UiEvent::EditTargetChanged(None));
                                let _ = ui_tx
                                    .try_send(UiEvent::Info(format!("Updated '{}'", updated.name)));
                            }
                            Err(err) => {
                                tracing::error!(
                                    product_id = product_id.0,
                                    "backend: update_product failed: {err}"
                                );
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_store_error(
                                    UiErrorContext::UpdateProduct,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::DeleteProduct { product_id } => {
                        tracing::info!(product_id = product_id.0, "backend: delete_product");
                        let was_edit_target = catalog
                            .edit_target()
                            .is_some_and(|target| target.id == product_id);
                        match catalog.delete(&store, product_id).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::CatalogUpdated(
                                    catalog.products().to_vec(),
                                ));
                                if was_edit_target {
                                    let _ = ui_tx.try_send(UiEvent::EditTargetChanged(None));
                                }
                                let _ = ui_tx.try_send(UiEvent::Info(format!(
                                    "Deleted product {}",
                                    product_id.0
                                )));
                            }
                            Err(err) => {
                                tracing::error!(
                                    product_id = product_id.0,
                                    "backend: delete_product failed: {err}"
                                );
                                // The delete itself may have landed before the
                                // re-sync failed; ship the snapshot either way.
                                let _ = ui_tx.try_send(UiEvent::CatalogUpdated(
                                    catalog.products().to_vec(),
                                ));
                                if was_edit_target && catalog.edit_target().is_none() {
                                    let _ = ui_tx.try_send(UiEvent::EditTargetChanged(None));
                                }
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_store_error(
                                    UiErrorContext::DeleteProduct,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::SelectForEdit { product_id } => {
                        if catalog.select_for_edit(product_id) {
                            let _ = ui_tx.try_send(UiEvent::EditTargetChanged(
                                catalog.edit_target().cloned(),
                            ));
                        } else {
                            let _ = ui_tx.try_send(UiEvent::Info(format!(
                                "Product {} is no longer in the catalog",
                                product_id.0
                            )));
                        }
                    }
                    BackendCommand::CancelEdit => {
                        catalog.set_edit_target(None);
                        let _ = ui_tx.try_send(UiEvent::EditTargetChanged(None));
                    }
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::ProductId;

    fn price(text: &str) -> Decimal {
        text.parse().expect("decimal literal")
    }

    fn product(id: i64, name: &str, image_url: &str, price_text: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            image_url: image_url.to_string(),
            price: price(price_text),
        }
    }

    fn test_app() -> CatalogApp {
        let (cmd_tx, _cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(8);
        CatalogApp::new(cmd_tx, ui_rx)
    }

    #[test]
    fn parse_draft_keeps_fractional_prices() {
        let form = ProductFormState {
            name: "Pen".to_string(),
            image_url: "b.png".to_string(),
            price_input: "1.999".to_string(),
        };

        let draft = form.parse_draft().expect("valid draft");
        assert_eq!(draft.price, price("1.999"));
    }

    #[test]
    fn parse_draft_trims_whitespace() {
        let form = ProductFormState {
            name: "  Pen  ".to_string(),
            image_url: " b.png ".to_string(),
            price_input: " 1.5 ".to_string(),
        };

        let draft = form.parse_draft().expect("valid draft");
        assert_eq!(draft.name, "Pen");
        assert_eq!(draft.image_url, "b.png");
    }

    #[test]
    fn parse_draft_rejects_blank_names() {
        let form = ProductFormState {
            name: "   ".to_string(),
            image_url: String::new(),
            price_input: "1.5".to_string(),
        };
        assert!(form.parse_draft().is_err());
    }

    #[test]
    fn parse_draft_rejects_non_numeric_prices() {
        let form = ProductFormState {
            name: "Pen".to_string(),
            image_url: String::new(),
            price_input: "cheap".to_string(),
        };
        assert!(form.parse_draft().is_err());
    }

    #[test]
    fn parse_draft_rejects_negative_prices() {
        let form = ProductFormState {
            name: "Pen".to_string(),
            image_url: String::new(),
            price_input: "-1.5".to_string(),
        };
        assert!(form.parse_draft().is_err());
    }

    #[test]
    fn formats_prices_with_two_decimal_places() {
        assert_eq!(format_price(price("9.99")), "$9.99");
        assert_eq!(format_price(price("1.5")), "$1.50");
        assert_eq!(format_price(price("3")), "$3.00");
    }

    #[test]
    fn catalog_snapshot_replaces_the_rendered_list() {
        let mut app = test_app();
        app.apply_event(UiEvent::CatalogUpdated(vec![product(
            1, "Notebook", "a.png", "9.99",
        )]));

        assert_eq!(app.products.len(), 1);
        assert!(app.last_synced.is_some());

        app.apply_event(UiEvent::CatalogUpdated(Vec::new()));
        assert!(app.products.is_empty());
    }

    #[test]
    fn edit_target_change_resets_the_form_fields() {
        let mut app = test_app();
        app.form.name = "half-typed".to_string();

        let target = product(2, "Pen", "b.png", "1.5");
        app.apply_event(UiEvent::EditTargetChanged(Some(target.clone())));

        assert_eq!(app.form.name, "Pen");
        assert_eq!(app.form.price_input, "1.5");
        assert_eq!(app.edit_target.as_ref().map(|p| p.id), Some(target.id));

        app.apply_event(UiEvent::EditTargetChanged(None));
        assert_eq!(app.form, ProductFormState::default());
        assert!(app.edit_target.is_none());
    }

    #[test]
    fn catalog_snapshot_alone_leaves_typed_fields_in_place() {
        // A successful create refreshes the list but never resets the form.
        let mut app = test_app();
        app.form.name = "Pen".to_string();
        app.form.price_input = "1.5".to_string();

        app.apply_event(UiEvent::CatalogUpdated(vec![product(
            2, "Pen", "b.png", "1.5",
        )]));

        assert_eq!(app.form.name, "Pen");
        assert_eq!(app.form.price_input, "1.5");
    }

    #[test]
    fn error_events_land_in_the_status_line() {
        let mut app = test_app();
        app.apply_event(UiEvent::Error(UiError::from_message(
            UiErrorContext::DeleteProduct,
            "server returned 404",
        )));
        assert!(app.status.starts_with("Couldn't delete the product"));
    }
}
