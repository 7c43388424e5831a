//! Row mapping for the `seller` table.

use seller_shared::{Seller, SellerId};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SellerRow {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl From<SellerRow> for Seller {
    fn from(row: SellerRow) -> Self {
        Seller {
            id: Some(SellerId(row.id)),
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            address: row.address,
            city: row.city,
        }
    }
}
