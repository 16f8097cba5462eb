//! Vendor directory of the selected location.
//!
//! The service has no server-side search or paging for vendors; the whole
//! list is fetched once per location and searched locally.

use contracts::domain::a001_payee::Payee;
use log::{debug, error};
use std::cell::RefCell;

use super::api::{HttpPayeeApi, PayeeApi};
use crate::shared::error::AppError;
use crate::system::auth::RequestContext;

pub type HttpPayeeDirectory = PayeeDirectory<HttpPayeeApi>;

fn collation_key(payee: &Payee) -> (String, &str) {
    (payee.name.to_lowercase(), payee.name.as_str())
}

fn matches_search(payee: &Payee, needle: &str) -> bool {
    payee.name.to_lowercase().contains(needle)
        || payee.phone_no.to_lowercase().contains(needle)
        || payee
            .email
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains(needle))
}

/// Active, non-deleted vendors matching `search`, sorted by name.
///
/// The sort is stable, so equal names keep the service's order.
pub fn select_visible(payees: &[Payee], search: Option<&str>) -> Vec<Payee> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut visible: Vec<Payee> = payees
        .iter()
        .filter(|p| p.is_selectable())
        .filter(|p| needle.as_deref().map_or(true, |n| matches_search(p, n)))
        .cloned()
        .collect();
    visible.sort_by(|a, b| collation_key(a).cmp(&collation_key(b)));
    visible
}

/// Vendor whose name equals `name_hint`, ignoring case and surrounding blanks.
pub fn find_by_name(payees: &[Payee], name_hint: &str) -> Option<Payee> {
    let wanted = name_hint.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    payees
        .iter()
        .find(|p| p.name.trim().to_lowercase() == wanted)
        .cloned()
}

#[derive(Debug, Default)]
struct DirectoryCache {
    location_id: Option<String>,
    entries: Vec<Payee>,
}

pub struct PayeeDirectory<A> {
    api: A,
    cache: RefCell<DirectoryCache>,
}

impl<A: PayeeApi> PayeeDirectory<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: RefCell::new(DirectoryCache::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the location's vendors and refresh the cache.
    ///
    /// Fails with [`AppError::DirectoryFetch`]; callers show an empty list and
    /// surface the error.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
    ) -> Result<Vec<Payee>, AppError> {
        let payees = self.api.get_payees(ctx).await.map_err(|e| {
            error!("vendor list for location {} failed: {}", ctx.location_id, e);
            AppError::DirectoryFetch(e.to_string())
        })?;

        let visible = select_visible(&payees, None);
        debug!(
            "vendor directory for {}: {} of {} selectable",
            ctx.location_id,
            visible.len(),
            payees.len()
        );

        let result = match search {
            Some(_) => select_visible(&visible, search),
            None => visible.clone(),
        };
        *self.cache.borrow_mut() = DirectoryCache {
            location_id: Some(ctx.location_id.clone()),
            entries: visible,
        };
        Ok(result)
    }

    /// Search the cached list without a round trip. Empty when the cache
    /// belongs to another location.
    pub fn search(&self, location_id: &str, text: &str) -> Vec<Payee> {
        let cache = self.cache.borrow();
        if cache.location_id.as_deref() != Some(location_id) {
            return Vec::new();
        }
        select_visible(&cache.entries, Some(text))
    }

    /// Make a just-created vendor selectable right away, before the
    /// directory has been refetched.
    pub fn add_provisional(&self, payee: Payee) -> Vec<Payee> {
        let mut cache = self.cache.borrow_mut();
        cache.entries.retain(|p| p.id != payee.id);
        cache.entries.push(payee);
        let sorted = select_visible(&cache.entries, None);
        cache.entries = sorted.clone();
        sorted
    }

    /// Refetch and find the stored record of a vendor that was just created,
    /// so its authoritative id can be used.
    pub async fn reconcile_new_vendor(
        &self,
        ctx: &RequestContext,
        name_hint: &str,
    ) -> Result<Payee, AppError> {
        let refreshed = self.list(ctx, None).await?;
        find_by_name(&refreshed, name_hint).ok_or_else(|| AppError::ReconciliationMiss {
            name: name_hint.trim().to_string(),
        })
    }

    pub fn cached(&self, location_id: &str) -> Vec<Payee> {
        let cache = self.cache.borrow();
        if cache.location_id.as_deref() == Some(location_id) {
            cache.entries.clone()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_payee::{CreatePayeeDto, PayeeId};
    use futures::executor::block_on;

    fn payee(id: &str, name: &str, phone: &str, email: Option<&str>) -> Payee {
        Payee {
            id: PayeeId::new(id),
            name: name.to_string(),
            phone_no: phone.to_string(),
            email: email.map(str::to_string),
            ..Payee::default()
        }
    }

    struct FakeApi {
        payees: RefCell<Result<Vec<Payee>, AppError>>,
    }

    impl FakeApi {
        fn with(payees: Vec<Payee>) -> Self {
            Self {
                payees: RefCell::new(Ok(payees)),
            }
        }
    }

    #[async_trait(?Send)]
    impl PayeeApi for FakeApi {
        async fn get_payees(&self, _ctx: &RequestContext) -> Result<Vec<Payee>, AppError> {
            self.payees.borrow().clone()
        }

        async fn add_payee(
            &self,
            _ctx: &RequestContext,
            dto: &CreatePayeeDto,
        ) -> Result<Payee, AppError> {
            Ok(Payee::from_create_dto(dto, PayeeId::placeholder()))
        }
    }

    fn ctx() -> RequestContext {
        RequestContext {
            location_id: "loc-1".into(),
            token: "token".into(),
        }
    }

    fn sample() -> Vec<Payee> {
        vec![
            payee("3", "zeta Supplies", "555-0300", None),
            payee("1", "Acme", "555-0100", Some("orders@acme.test")),
            Payee {
                is_deleted: true,
                ..payee("9", "Deleted Co", "555-0900", None)
            },
            Payee {
                is_active: false,
                ..payee("8", "Dormant Co", "555-0800", None)
            },
            payee("2", "beta Foods", "312-0200", Some("hello@BETA.test")),
        ]
    }

    fn names(payees: &[Payee]) -> Vec<&str> {
        payees.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn lists_only_selectable_vendors_sorted_by_name() {
        let directory = PayeeDirectory::new(FakeApi::with(sample()));
        let listed = block_on(directory.list(&ctx(), None)).unwrap();
        assert_eq!(names(&listed), vec!["Acme", "beta Foods", "zeta Supplies"]);
    }

    #[test]
    fn search_covers_name_email_and_phone_ignoring_case() {
        let directory = PayeeDirectory::new(FakeApi::with(sample()));
        let by_email = block_on(directory.list(&ctx(), Some("beta.TEST"))).unwrap();
        assert_eq!(names(&by_email), vec!["beta Foods"]);

        let by_phone = block_on(directory.list(&ctx(), Some("555-01"))).unwrap();
        assert_eq!(names(&by_phone), vec!["Acme"]);

        let by_name = block_on(directory.list(&ctx(), Some("  SUPP "))).unwrap();
        assert_eq!(names(&by_name), vec!["zeta Supplies"]);

        assert!(block_on(directory.list(&ctx(), Some("dormant")))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn listing_is_idempotent() {
        let mut payees = sample();
        payees.push(payee("4", "acme", "555-0400", None));
        let directory = PayeeDirectory::new(FakeApi::with(payees));
        let first = block_on(directory.list(&ctx(), None)).unwrap();
        let second = block_on(directory.list(&ctx(), None)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Acme");
        assert_eq!(first[1].name, "acme");
    }

    #[test]
    fn failed_fetch_is_a_directory_error() {
        let api = FakeApi {
            payees: RefCell::new(Err(AppError::Transport("HTTP 502".into()))),
        };
        let directory = PayeeDirectory::new(api);
        let err = block_on(directory.list(&ctx(), None)).unwrap_err();
        assert!(matches!(err, AppError::DirectoryFetch(_)));
        assert!(directory.cached("loc-1").is_empty());
    }

    #[test]
    fn cached_search_is_scoped_to_location() {
        let directory = PayeeDirectory::new(FakeApi::with(sample()));
        block_on(directory.list(&ctx(), None)).unwrap();
        assert_eq!(names(&directory.search("loc-1", "acme")), vec!["Acme"]);
        assert!(directory.search("loc-2", "acme").is_empty());
    }

    #[test]
    fn reconciles_created_vendor_case_insensitively() {
        let directory = PayeeDirectory::new(FakeApi::with(sample()));
        let dto = CreatePayeeDto {
            name: "ACME".into(),
            phone_no: "555-0100".into(),
            ..CreatePayeeDto::default()
        };
        let provisional = block_on(directory.api().add_payee(&ctx(), &dto)).unwrap();
        assert!(provisional.id.is_placeholder());

        let with_provisional = directory.add_provisional(provisional);
        assert!(with_provisional.iter().any(|p| p.id.is_placeholder()));

        let reconciled = block_on(directory.reconcile_new_vendor(&ctx(), "ACME")).unwrap();
        assert_eq!(reconciled.id, PayeeId::new("1"));
        assert_eq!(reconciled.name, "Acme");
        assert!(directory.cached("loc-1").iter().all(|p| !p.id.is_placeholder()));
    }

    #[test]
    fn reconciliation_miss_is_reported() {
        let directory = PayeeDirectory::new(FakeApi::with(sample()));
        let err = block_on(directory.reconcile_new_vendor(&ctx(), "Nonexistent Ltd")).unwrap_err();
        assert_eq!(
            err,
            AppError::ReconciliationMiss {
                name: "Nonexistent Ltd".into()
            }
        );
    }

    #[test]
    fn find_by_name_ignores_blank_hint() {
        assert_eq!(find_by_name(&sample(), "   "), None);
        assert_eq!(
            find_by_name(&sample(), " beta foods ").map(|p| p.id),
            Some(PayeeId::new("2"))
        );
    }
}
