use crate::domain::common::RemoteId;
use crate::shared::lenient;
use serde::{Deserialize, Serialize};

pub type PayeeId = RemoteId;

fn active_by_default() -> bool {
    true
}

// ============================================================================
// Aggregate
// ============================================================================

/// Vendor that purchase orders are issued against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payee {
    #[serde(default, alias = "_id")]
    pub id: PayeeId,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub phone_no: String,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub email: Option<String>,

    // Descriptive fields, no cross-field rules
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub contact_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub address1: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub address2: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub account_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub fax: Option<String>,

    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

// A vendor the service sends without `isActive` is active; keep the local default in step.
impl Default for Payee {
    fn default() -> Self {
        Self {
            id: PayeeId::default(),
            name: String::new(),
            phone_no: String::new(),
            email: None,
            contact_name: None,
            address1: None,
            address2: None,
            city: None,
            state: None,
            zip_code: None,
            account_no: None,
            payment_method: None,
            fax: None,
            is_active: active_by_default(),
            is_deleted: false,
        }
    }
}

impl Payee {
    /// Only active, non-deleted vendors are offered anywhere in the UI.
    pub fn is_selectable(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Local copy of a vendor built from the creation payload, used when the
    /// service does not echo the stored record back.
    pub fn from_create_dto(dto: &CreatePayeeDto, id: PayeeId) -> Self {
        fn non_empty(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        Self {
            id,
            name: dto.name.trim().to_string(),
            phone_no: dto.phone_no.trim().to_string(),
            email: non_empty(&dto.email),
            contact_name: non_empty(&dto.contact_name),
            address1: non_empty(&dto.address1),
            address2: non_empty(&dto.address2),
            city: non_empty(&dto.city),
            state: non_empty(&dto.state),
            zip_code: non_empty(&dto.zip_code),
            account_no: non_empty(&dto.account_no),
            payment_method: non_empty(&dto.payment_method),
            fax: non_empty(&dto.fax),
            is_active: true,
            is_deleted: false,
        }
    }

    pub fn to_ref(&self) -> PayeeRef {
        PayeeRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Snapshot of a vendor embedded in a purchase order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayeeRef {
    #[serde(default, alias = "_id")]
    pub id: PayeeId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /getPayee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPayeeRequest {
    pub location_id: String,
}

/// Body of `POST /addPayee`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayeeDto {
    pub name: String,
    pub contact_name: String,
    pub phone_no: String,
    pub email: String,
    pub fax: String,
    pub state: String,
    pub city: String,
    pub zip_code: String,
    pub account_no: String,
    pub payment_method: String,
    pub address1: String,
    pub address2: String,
    pub location_id: String,
}
