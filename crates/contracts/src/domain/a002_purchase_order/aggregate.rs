use crate::domain::a001_payee::{PayeeId, PayeeRef};
use crate::domain::common::RemoteId;
use crate::shared::api_response::ApiStatus;
use crate::shared::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type PurchaseOrderId = RemoteId;

/// Payment type code meaning "every payment type" in list queries.
pub const PAYMENT_TYPE_ALL: u8 = 0;

// ============================================================================
// Payment type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentType {
    Cash,
    Eft,
    Check,
    CreditCard,
}

impl PaymentType {
    pub const ALL: [PaymentType; 4] = [
        PaymentType::Cash,
        PaymentType::Eft,
        PaymentType::Check,
        PaymentType::CreditCard,
    ];

    pub fn code(self) -> u8 {
        match self {
            PaymentType::Cash => 1,
            PaymentType::Eft => 2,
            PaymentType::Check => 3,
            PaymentType::CreditCard => 4,
        }
    }

    /// `0` is the "all" filter value and never a stored payment type.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PaymentType::Cash),
            2 => Some(PaymentType::Eft),
            3 => Some(PaymentType::Check),
            4 => Some(PaymentType::CreditCard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Eft => "EFT",
            PaymentType::Check => "Check",
            PaymentType::CreditCard => "Credit Card",
        }
    }
}

// ============================================================================
// Status
// ============================================================================

/// Display status derived from the boolean `status` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Open,
    Close,
    Unknown,
}

impl OrderStatus {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => OrderStatus::Close,
            Some(false) => OrderStatus::Open,
            None => OrderStatus::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Open => "Open",
            OrderStatus::Close => "Close",
            OrderStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Open" => Some(OrderStatus::Open),
            "Close" => Some(OrderStatus::Close),
            "Unknown" => Some(OrderStatus::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Purchase order as returned by `getAllPurchaseEntry`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    #[serde(default, alias = "_id")]
    pub id: PurchaseOrderId,

    /// Business date (YYYY-MM-DD), not an instant
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,

    #[serde(default)]
    pub payee: Option<PayeeRef>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub invoice_no: String,

    #[serde(default, deserialize_with = "lenient::code")]
    pub payment_type: u8,

    #[serde(default = "zero_amount", deserialize_with = "lenient::money")]
    pub total: String,

    #[serde(default = "zero_amount", deserialize_with = "lenient::money")]
    pub retail: String,

    /// `true` = closed, `false` = open; anything else is unknown
    #[serde(default, deserialize_with = "lenient::flag")]
    pub status: Option<bool>,
}

fn zero_amount() -> String {
    "0".to_string()
}

impl PurchaseOrder {
    pub fn status_label(&self) -> OrderStatus {
        OrderStatus::from_flag(self.status)
    }

    pub fn payee_id(&self) -> Option<&PayeeId> {
        self.payee.as_ref().map(|p| &p.id)
    }

    pub fn payee_name(&self) -> &str {
        self.payee.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    pub fn payment_type(&self) -> Option<PaymentType> {
        PaymentType::from_code(self.payment_type)
    }
}

// ============================================================================
// Requests / responses
// ============================================================================

/// Body of `POST /getAllPurchaseEntry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderListRequest {
    pub payment_type: u8,
    /// ISO-8601 instant, inclusive
    pub start_date: String,
    /// ISO-8601 instant, inclusive
    pub end_date: String,
    pub location_id: String,
    pub page: usize,
    pub limit: usize,
}

/// Pagination block reported by the service. Its page size is not trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPagination {
    #[serde(default, deserialize_with = "lenient::count")]
    pub current_page: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_pages: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_items: usize,
}

/// Aggregated totals over the whole filtered range, computed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseTotals {
    #[serde(default = "zero_amount", deserialize_with = "lenient::money")]
    pub cost: String,
    #[serde(default = "zero_amount", deserialize_with = "lenient::money")]
    pub retail: String,
}

impl Default for PurchaseTotals {
    fn default() -> Self {
        Self {
            cost: zero_amount(),
            retail: zero_amount(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderListResponse {
    #[serde(flatten)]
    pub meta: ApiStatus,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    pub data: Vec<PurchaseOrder>,
    #[serde(default)]
    pub pagination: Option<ServerPagination>,
    #[serde(default, rename = "Total")]
    pub totals: Option<PurchaseTotals>,
}

/// Body of `POST /addPurchaseEntry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderDto {
    pub date: String,
    pub payee_id: PayeeId,
    pub invoice_no: String,
    pub payment_type: u8,
    pub location_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePurchaseOrderResponse {
    #[serde(flatten)]
    pub meta: ApiStatus,
    #[serde(default)]
    pub id: Option<PurchaseOrderId>,
}

/// Body of `POST /deletePurchaseOrder`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePurchaseOrderRequest {
    pub id: PurchaseOrderId,
    pub location_id: String,
}
