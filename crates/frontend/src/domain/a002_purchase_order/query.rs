//! Fetching a page of purchase orders and folding the result into list state.

use chrono::{DateTime, Utc};
use contracts::domain::a002_purchase_order::{
    PurchaseOrder, PurchaseOrderListRequest, PurchaseOrderListResponse, PurchaseTotals,
    PAYMENT_TYPE_ALL,
};
use log::{debug, error, warn};
use std::cell::RefCell;

use super::api::{HttpPurchaseOrderApi, PurchaseOrderApi};
use crate::shared::date_window::{to_query_window_at, DateRange};
use crate::shared::error::AppError;
use crate::shared::pagination::Pagination;
use crate::system::auth::RequestContext;

pub type HttpPurchaseOrderQuery = PurchaseOrderQuery<HttpPurchaseOrderApi>;

/// Everything one list request depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParams {
    pub location_id: String,
    pub date_range: DateRange,
    pub page: usize,
    pub items_per_page: usize,
}

impl QueryParams {
    pub fn to_request(&self) -> PurchaseOrderListRequest {
        self.to_request_at(Utc::now())
    }

    pub fn to_request_at(&self, now: DateTime<Utc>) -> PurchaseOrderListRequest {
        let window = to_query_window_at(&self.date_range, now);
        PurchaseOrderListRequest {
            payment_type: PAYMENT_TYPE_ALL,
            start_date: window.start_iso(),
            end_date: window.end_iso(),
            location_id: self.location_id.clone(),
            page: self.page.max(1),
            limit: self.items_per_page.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrderPage {
    pub orders: Vec<PurchaseOrder>,
    pub pagination: Pagination,
    pub totals: PurchaseTotals,
}

impl PurchaseOrderPage {
    pub fn from_response(response: PurchaseOrderListResponse, items_per_page: usize) -> Self {
        let pagination = match response.pagination {
            Some(server) => Pagination::derive(&server, items_per_page),
            None => {
                warn!("purchase order list came back without pagination");
                Pagination::empty(items_per_page)
            }
        };
        Self {
            orders: response.data,
            pagination,
            totals: response.totals.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

/// Hands out increasing tickets; only the latest one may update the view.
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: u64,
}

impl QuerySequencer {
    pub fn issue(&mut self) -> QueryTicket {
        self.latest += 1;
        QueryTicket(self.latest)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// A finished request, tagged with the ticket it was issued under.
#[derive(Debug, Clone)]
pub struct QueryCompletion {
    pub ticket: QueryTicket,
    pub params: QueryParams,
    pub result: Result<PurchaseOrderPage, AppError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    /// A newer request was issued meanwhile; nothing changed.
    Stale,
}

/// What the list view renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderListData {
    pub orders: Vec<PurchaseOrder>,
    pub pagination: Pagination,
    pub totals: PurchaseTotals,
    pub error: Option<AppError>,
    pub last_params: Option<QueryParams>,
    pub is_loading: bool,
    pub is_loaded: bool,
}

impl OrderListData {
    pub fn mark_loading(&mut self, params: &QueryParams) {
        self.is_loading = true;
        self.last_params = Some(params.clone());
    }

    /// Back to an empty first page, as after "Clear Filters".
    pub fn reset_results(&mut self, items_per_page: usize) {
        self.orders.clear();
        self.totals = PurchaseTotals::default();
        self.pagination = Pagination::empty(items_per_page);
        self.error = None;
    }
}

/// Runs list requests and guards the view against out-of-order replies.
pub struct PurchaseOrderQuery<A> {
    api: A,
    sequencer: RefCell<QuerySequencer>,
}

impl<A: PurchaseOrderApi> PurchaseOrderQuery<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            sequencer: RefCell::new(QuerySequencer::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Issue a ticket for a request that is about to start.
    pub fn begin(&self) -> QueryTicket {
        self.sequencer.borrow_mut().issue()
    }

    pub async fn run(
        &self,
        ctx: &RequestContext,
        params: &QueryParams,
    ) -> Result<PurchaseOrderPage, AppError> {
        let request = params.to_request();
        let response = self.api.list(ctx, &request).await?;
        let page = PurchaseOrderPage::from_response(response, params.items_per_page);
        debug!(
            "purchase orders page {}: {} rows, {} total",
            page.pagination.current_page,
            page.orders.len(),
            page.pagination.total_items
        );
        Ok(page)
    }

    /// [`begin`](Self::begin) and [`run`](Self::run) in one step.
    pub async fn fetch(&self, ctx: &RequestContext, params: QueryParams) -> QueryCompletion {
        let ticket = self.begin();
        let result = self.run(ctx, &params).await;
        QueryCompletion {
            ticket,
            params,
            result,
        }
    }

    /// Fold a completed request into `data`.
    ///
    /// Success replaces orders, totals and pagination wholesale. Failure keeps
    /// whatever was shown before and records the error. A completion whose
    /// ticket is no longer the latest is dropped.
    pub fn settle(&self, data: &mut OrderListData, completion: QueryCompletion) -> ApplyOutcome {
        if !self.sequencer.borrow().is_current(completion.ticket) {
            debug!(
                "discarding stale purchase order response {:?}",
                completion.ticket
            );
            return ApplyOutcome::Stale;
        }

        data.is_loading = false;
        data.last_params = Some(completion.params);
        match completion.result {
            Ok(page) => {
                data.orders = page.orders;
                data.pagination = page.pagination;
                data.totals = page.totals;
                data.error = None;
                data.is_loaded = true;
                ApplyOutcome::Applied
            }
            Err(err) => {
                error!("failed to load purchase orders: {}", err);
                data.error = Some(err);
                ApplyOutcome::Failed
            }
        }
    }
}
