//! Compile-time settings for the back-office frontend.

/// Port the POS service listens on, next to the host serving the app.
pub const API_PORT: u16 = 3000;

/// Business days start at this hour (UTC). Purchase-order queries are
/// windowed on this boundary rather than on the browser's timezone.
pub const BUSINESS_DAY_BOUNDARY_HOUR_UTC: i64 = 5;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// How long a deleted row keeps its "deleting" mark before the list refetches.
pub const DELETE_REFETCH_DELAY_MS: u32 = 1_000;

pub const TOAST_DISMISS_MS: u32 = 4_000;

pub mod endpoints {
    pub const GET_PAYEE: &str = "/getPayee";
    pub const ADD_PAYEE: &str = "/addPayee";
    pub const ADD_PURCHASE_ENTRY: &str = "/addPurchaseEntry";
    pub const GET_ALL_PURCHASE_ENTRY: &str = "/getAllPurchaseEntry";
    pub const DELETE_PURCHASE_ORDER: &str = "/deletePurchaseOrder";
}
