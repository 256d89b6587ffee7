//! Backend commands queued from UI to backend worker.

use shared::domain::{ProductDraft, ProductId};

pub enum BackendCommand {
    RefreshCatalog,
    CreateProduct {
        draft: ProductDraft,
    },
    UpdateProduct {
        product_id: ProductId,
        draft: ProductDraft,
    },
    DeleteProduct {
        product_id: ProductId,
    },
    SelectForEdit {
        product_id: ProductId,
    },
    CancelEdit,
}
