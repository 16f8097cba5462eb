//! Page-local filters over the fetched purchase orders.
//!
//! The service filters by date and location only; status and vendor are
//! applied to the current page after it arrives.

use contracts::domain::a001_payee::PayeeId;
use contracts::domain::a002_purchase_order::{OrderStatus, PurchaseOrder};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(OrderStatus::Open),
        StatusFilter::Only(OrderStatus::Close),
        StatusFilter::Only(OrderStatus::Unknown),
    ];

    /// Value used in the status `<select>`.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    /// Unrecognised values fall back to `All`.
    pub fn parse(value: &str) -> Self {
        OrderStatus::parse(value)
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All)
    }

    pub fn matches(self, order: &PurchaseOrder) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status_label() == status,
        }
    }
}

/// Status first, then vendor.
pub fn apply_filters(
    orders: &[PurchaseOrder],
    status: StatusFilter,
    payee: Option<&PayeeId>,
) -> Vec<PurchaseOrder> {
    orders
        .iter()
        .filter(|o| status.matches(o))
        .filter(|o| payee.map_or(true, |wanted| o.payee_id() == Some(wanted)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_payee::PayeeRef;

    fn order(id: &str, payee: Option<&str>, status: Option<bool>) -> PurchaseOrder {
        PurchaseOrder {
            id: id.into(),
            date: "2025-07-01".into(),
            payee: payee.map(|p| PayeeRef {
                id: PayeeId::new(p),
                name: format!("Vendor {}", p),
            }),
            invoice_no: format!("INV-{}", id),
            payment_type: 1,
            status,
            ..PurchaseOrder::default()
        }
    }

    fn page() -> Vec<PurchaseOrder> {
        vec![
            order("1", Some("A"), Some(true)),
            order("2", Some("A"), Some(false)),
            order("3", Some("B"), Some(true)),
            order("4", None, None),
            order("5", Some("B"), None),
        ]
    }

    fn ids(orders: &[PurchaseOrder]) -> Vec<String> {
        orders.iter().map(|o| o.id.to_string()).collect()
    }

    #[test]
    fn no_filters_keep_the_page() {
        assert_eq!(apply_filters(&page(), StatusFilter::All, None), page());
    }

    #[test]
    fn status_filter_uses_the_display_label() {
        let closed = apply_filters(&page(), StatusFilter::Only(OrderStatus::Close), None);
        assert_eq!(ids(&closed), vec!["1", "3"]);

        let unknown = apply_filters(&page(), StatusFilter::Only(OrderStatus::Unknown), None);
        assert_eq!(ids(&unknown), vec!["4", "5"]);
    }

    #[test]
    fn vendor_filter_matches_payee_id() {
        let vendor = PayeeId::new("B");
        assert_eq!(
            ids(&apply_filters(&page(), StatusFilter::All, Some(&vendor))),
            vec!["3", "5"]
        );
    }

    #[test]
    fn combined_filters_equal_either_order() {
        let vendor = PayeeId::new("A");
        let status = StatusFilter::Only(OrderStatus::Close);
        let combined = apply_filters(&page(), status, Some(&vendor));
        assert_eq!(ids(&combined), vec!["1"]);

        let vendor_first = apply_filters(&page(), StatusFilter::All, Some(&vendor));
        let then_status = apply_filters(&vendor_first, status, None);
        assert_eq!(combined, then_status);
    }

    #[test]
    fn parse_falls_back_to_all() {
        assert_eq!(StatusFilter::parse("Open"), StatusFilter::Only(OrderStatus::Open));
        assert_eq!(StatusFilter::parse("All"), StatusFilter::All);
        assert_eq!(StatusFilter::parse("closed"), StatusFilter::All);
        for option in StatusFilter::OPTIONS {
            assert_eq!(StatusFilter::parse(option.as_str()), option);
        }
    }
}
