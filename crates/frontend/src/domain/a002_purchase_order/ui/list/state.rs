use crate::domain::a002_purchase_order::delete::DeleteTracker;
use crate::domain::a002_purchase_order::filter::{apply_filters, StatusFilter};
use crate::domain::a002_purchase_order::query::{OrderListData, QueryParams};
use crate::shared::date_window::DateRange;
use crate::shared::pagination::PageState;
use chrono::{NaiveDate, Utc};
use contracts::domain::a001_payee::PayeeId;
use contracts::domain::a002_purchase_order::PurchaseOrder;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseOrderListState {
    pub date_range: DateRange,
    pub status_filter: StatusFilter,
    pub selected_payee: Option<PayeeId>,
    pub page: PageState,
    pub data: OrderListData,
    pub deletes: DeleteTracker,
}

impl Default for PurchaseOrderListState {
    fn default() -> Self {
        Self::for_today(Utc::now().date_naive())
    }
}

impl PurchaseOrderListState {
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            date_range: DateRange::current_month(today),
            status_filter: StatusFilter::All,
            selected_payee: None,
            page: PageState::default(),
            data: OrderListData::default(),
            deletes: DeleteTracker::default(),
        }
    }

    /// Parameters of the request the current filters call for. Status and
    /// vendor are page-local and deliberately absent.
    pub fn query_params(&self, location_id: &str) -> QueryParams {
        QueryParams {
            location_id: location_id.to_string(),
            date_range: self.date_range.clone(),
            page: self.page.current_page,
            items_per_page: self.page.items_per_page,
        }
    }

    pub fn visible_orders(&self) -> Vec<PurchaseOrder> {
        apply_filters(
            &self.data.orders,
            self.status_filter,
            self.selected_payee.as_ref(),
        )
    }

    /// A new date range starts over at page 1.
    pub fn set_date_range(&mut self, range: DateRange) {
        if self.date_range != range {
            self.date_range = range;
            self.page.set_page(1);
        }
    }

    pub fn clear_filters(&mut self, today: NaiveDate) {
        self.date_range = DateRange::current_month(today);
        self.status_filter = StatusFilter::All;
        self.selected_payee = None;
        self.page.set_page(1);
        self.data.reset_results(self.page.items_per_page);
    }

    /// Loading hides both the error and the table.
    pub fn view_mode(&self) -> ListViewMode {
        if self.data.is_loading {
            ListViewMode::Loading
        } else if self.data.error.is_some() {
            ListViewMode::Error
        } else {
            ListViewMode::Data
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListViewMode {
    Loading,
    Error,
    Data,
}

pub fn create_state() -> RwSignal<PurchaseOrderListState> {
    RwSignal::new(PurchaseOrderListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::AppError;
    use contracts::domain::a001_payee::PayeeRef;
    use contracts::domain::a002_purchase_order::{OrderStatus, PurchaseTotals};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    fn order(id: &str, payee: &str, closed: bool) -> PurchaseOrder {
        PurchaseOrder {
            id: id.into(),
            payee: Some(PayeeRef {
                id: PayeeId::new(payee),
                name: payee.to_string(),
            }),
            status: Some(closed),
            ..PurchaseOrder::default()
        }
    }

    #[test]
    fn defaults_to_current_month_first_page() {
        let state = PurchaseOrderListState::for_today(today());
        assert_eq!(state.date_range, DateRange::new("2025-07-01", "2025-07-31"));
        let params = state.query_params("loc-1");
        assert_eq!((params.page, params.items_per_page), (1, 10));
    }

    #[test]
    fn page_local_filters_do_not_change_query_params() {
        let mut state = PurchaseOrderListState::for_today(today());
        let before = state.query_params("loc-1");
        state.status_filter = StatusFilter::Only(OrderStatus::Open);
        state.selected_payee = Some(PayeeId::new("A"));
        assert_eq!(state.query_params("loc-1"), before);
    }

    #[test]
    fn new_date_range_resets_page() {
        let mut state = PurchaseOrderListState::for_today(today());
        state.page.set_page(4);
        state.set_date_range(DateRange::single_day(today()));
        assert_eq!(state.page.current_page, 1);

        state.page.set_page(2);
        state.set_date_range(DateRange::single_day(today()));
        assert_eq!(state.page.current_page, 2);
    }

    #[test]
    fn visible_orders_apply_status_then_vendor() {
        let mut state = PurchaseOrderListState::for_today(today());
        state.data.orders = vec![order("1", "A", true), order("2", "A", false), order("3", "B", true)];
        state.status_filter = StatusFilter::Only(OrderStatus::Close);
        state.selected_payee = Some(PayeeId::new("A"));
        let visible = state.visible_orders();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "1");
    }

    #[test]
    fn clear_filters_restores_defaults_and_zeroes_totals() {
        let mut state = PurchaseOrderListState::for_today(today());
        state.set_date_range(DateRange::new("2025-01-01", "2025-01-31"));
        state.status_filter = StatusFilter::Only(OrderStatus::Open);
        state.selected_payee = Some(PayeeId::new("A"));
        state.page.set_page(3);
        state.data.totals = PurchaseTotals {
            cost: "10".into(),
            retail: "20".into(),
        };

        state.clear_filters(today());
        assert_eq!(state.date_range, DateRange::current_month(today()));
        assert_eq!(state.status_filter, StatusFilter::All);
        assert_eq!(state.selected_payee, None);
        assert_eq!(state.page.current_page, 1);
        assert_eq!(state.data.totals, PurchaseTotals::default());
    }

    #[test]
    fn loading_suppresses_error_and_data() {
        let mut state = PurchaseOrderListState::for_today(today());
        assert_eq!(state.view_mode(), ListViewMode::Data);
        state.data.error = Some(AppError::Transport("offline".into()));
        assert_eq!(state.view_mode(), ListViewMode::Error);
        state.data.is_loading = true;
        assert_eq!(state.view_mode(), ListViewMode::Loading);
    }
}
