use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProductId);

/// A catalog record as the rest of the client reasons about it.
///
/// `price` is a `Decimal`, never a float or integer: a fractional price such
/// as 1.999 survives form input, wire transfer, and display untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
}

/// Field values for a product that has no server-assigned id yet, or the
/// replacement values for an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
}
