use crate::domain::a001_payee::api::PayeeApi;
use crate::domain::a001_payee::directory::PayeeDirectory;
use crate::domain::a002_purchase_order::api::{HttpPurchaseOrderApi, PurchaseOrderApi};
use crate::layout::notifications::{report_inline, NotificationService};
use crate::shared::date_window::parse_business_date;
use crate::shared::error::AppError;
use crate::system::auth::RequestContext;
use chrono::NaiveDate;
use contracts::domain::a001_payee::{Payee, PayeeId};
use contracts::domain::a002_purchase_order::{CreatePurchaseOrderDto, PaymentType, PurchaseOrderId};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseOrderForm {
    /// Business date, `YYYY-MM-DD`
    pub date: String,
    pub payee_id: Option<PayeeId>,
    pub invoice_no: String,
    pub payment_type: u8,
}

impl PurchaseOrderForm {
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            payee_id: None,
            invoice_no: String::new(),
            payment_type: PaymentType::Cash.code(),
        }
    }
}

/// Check the form and build the request body for `location_id`.
pub fn validate_purchase_order_form(
    form: &PurchaseOrderForm,
    location_id: &str,
) -> Result<CreatePurchaseOrderDto, AppError> {
    let date = parse_business_date(&form.date)
        .ok_or_else(|| AppError::Validation("A valid date is required".into()))?;
    let payee_id = form
        .payee_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("Select a vendor".into()))?;
    if payee_id.is_placeholder() {
        return Err(AppError::Validation(
            "The new vendor is still being saved; select it again in a moment".into(),
        ));
    }
    let invoice_no = form.invoice_no.trim();
    if invoice_no.is_empty() {
        return Err(AppError::Validation("Invoice number is required".into()));
    }
    let payment_type = PaymentType::from_code(form.payment_type)
        .ok_or_else(|| AppError::Validation("Select a payment type".into()))?;

    Ok(CreatePurchaseOrderDto {
        date: date.format("%Y-%m-%d").to_string(),
        payee_id,
        invoice_no: invoice_no.to_string(),
        payment_type: payment_type.code(),
        location_id: location_id.to_string(),
    })
}

pub async fn submit_purchase_order<A: PurchaseOrderApi>(
    api: &A,
    ctx: &RequestContext,
    form: &PurchaseOrderForm,
) -> Result<Option<PurchaseOrderId>, AppError> {
    let dto = validate_purchase_order_form(form, &ctx.location_id)?;
    api.create(ctx, &dto).await
}

/// Result of bringing a just-created vendor into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorAdoption {
    pub payees: Vec<Payee>,
    pub selected: Option<PayeeId>,
    /// Non-fatal problem to surface; the vendor itself was created.
    pub problem: Option<AppError>,
}

/// Show the new vendor right away, then refetch to learn its stored id and
/// select it.
///
/// When the refetch cannot find it, a vendor that already has a real id stays
/// selectable; a placeholder is never selected since the service would reject
/// it.
pub async fn adopt_new_vendor<A: PayeeApi>(
    directory: &PayeeDirectory<A>,
    ctx: &RequestContext,
    created: Payee,
) -> VendorAdoption {
    directory.add_provisional(created.clone());

    match directory.reconcile_new_vendor(ctx, &created.name).await {
        Ok(stored) => VendorAdoption {
            payees: directory.cached(&ctx.location_id),
            selected: Some(stored.id),
            problem: None,
        },
        Err(problem) => {
            let selected = if created.id.is_placeholder() {
                None
            } else {
                let id = created.id.clone();
                directory.add_provisional(created);
                Some(id)
            };
            VendorAdoption {
                payees: directory.cached(&ctx.location_id),
                selected,
                problem: Some(problem),
            }
        }
    }
}

/// ViewModel for the "New purchase order" form
#[derive(Clone, Copy)]
pub struct CreatePurchaseOrderViewModel {
    pub form: RwSignal<PurchaseOrderForm>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub show_new_vendor: RwSignal<bool>,
}

impl CreatePurchaseOrderViewModel {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            form: RwSignal::new(PurchaseOrderForm::for_date(today)),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            show_new_vendor: RwSignal::new(false),
        }
    }

    pub fn save_command(
        &self,
        ctx: Option<RequestContext>,
        notifications: NotificationService,
        on_created: Callback<()>,
    ) {
        if self.saving.get_untracked() {
            return;
        }
        let Some(ctx) = ctx else {
            let text =
                report_inline(&notifications, "create purchase order", &AppError::MissingLocation);
            self.error.set(Some(text));
            return;
        };
        let current = self.form.get_untracked();
        if let Err(e) = validate_purchase_order_form(&current, &ctx.location_id) {
            self.error
                .set(Some(report_inline(&notifications, "create purchase order", &e)));
            return;
        }

        let vm = *self;
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = submit_purchase_order(&HttpPurchaseOrderApi, &ctx, &current).await;
            vm.saving.try_set(false);
            match result {
                Ok(id) => {
                    log::info!("purchase order saved (id {:?})", id.map(|i| i.to_string()));
                    on_created.run(());
                }
                Err(e) => {
                    vm.error
                        .try_set(Some(report_inline(&notifications, "create purchase order", &e)));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_payee::CreatePayeeDto;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    fn ctx() -> RequestContext {
        RequestContext {
            location_id: "loc-1".into(),
            token: "token".into(),
        }
    }

    fn filled() -> PurchaseOrderForm {
        PurchaseOrderForm {
            payee_id: Some(PayeeId::new("p-1")),
            invoice_no: " INV-42 ".into(),
            payment_type: PaymentType::Check.code(),
            ..PurchaseOrderForm::for_date(today())
        }
    }

    #[test]
    fn valid_form_builds_request_body() {
        let dto = validate_purchase_order_form(&filled(), "loc-1").unwrap();
        assert_eq!(
            dto,
            CreatePurchaseOrderDto {
                date: "2025-07-15".into(),
                payee_id: PayeeId::new("p-1"),
                invoice_no: "INV-42".into(),
                payment_type: 3,
                location_id: "loc-1".into(),
            }
        );
    }

    #[test]
    fn each_required_field_is_checked() {
        let bad_date = PurchaseOrderForm {
            date: "15/07/2025".into(),
            ..filled()
        };
        let no_payee = PurchaseOrderForm {
            payee_id: None,
            ..filled()
        };
        let no_invoice = PurchaseOrderForm {
            invoice_no: "   ".into(),
            ..filled()
        };
        let all_payment_types = PurchaseOrderForm {
            payment_type: 0,
            ..filled()
        };
        let unknown_payment_type = PurchaseOrderForm {
            payment_type: 5,
            ..filled()
        };
        for form in [bad_date, no_payee, no_invoice, all_payment_types, unknown_payment_type] {
            assert!(matches!(
                validate_purchase_order_form(&form, "loc-1"),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn placeholder_vendor_cannot_be_submitted() {
        let form = PurchaseOrderForm {
            payee_id: Some(PayeeId::placeholder()),
            ..filled()
        };
        assert!(validate_purchase_order_form(&form, "loc-1").is_err());
    }

    struct FakePayees {
        stored: RefCell<Vec<Payee>>,
    }

    #[async_trait(?Send)]
    impl PayeeApi for FakePayees {
        async fn get_payees(&self, _ctx: &RequestContext) -> Result<Vec<Payee>, AppError> {
            Ok(self.stored.borrow().clone())
        }

        async fn add_payee(
            &self,
            _ctx: &RequestContext,
            dto: &CreatePayeeDto,
        ) -> Result<Payee, AppError> {
            Ok(Payee::from_create_dto(dto, PayeeId::placeholder()))
        }
    }

    fn stored(id: &str, name: &str) -> Payee {
        Payee {
            id: PayeeId::new(id),
            name: name.into(),
            phone_no: "555".into(),
            ..Payee::default()
        }
    }

    #[test]
    fn new_vendor_is_reconciled_and_selected() {
        let directory = PayeeDirectory::new(FakePayees {
            stored: RefCell::new(vec![stored("1", "Acme"), stored("2", "Beta")]),
        });
        let created = Payee::from_create_dto(
            &CreatePayeeDto {
                name: "ACME".into(),
                phone_no: "555".into(),
                ..CreatePayeeDto::default()
            },
            PayeeId::placeholder(),
        );

        let adoption = block_on(adopt_new_vendor(&directory, &ctx(), created));
        assert_eq!(adoption.selected, Some(PayeeId::new("1")));
        assert_eq!(adoption.problem, None);
        assert_eq!(adoption.payees.len(), 2);
    }

    #[test]
    fn reconciliation_miss_warns_and_keeps_real_ids() {
        let directory = PayeeDirectory::new(FakePayees {
            stored: RefCell::new(vec![stored("2", "Beta")]),
        });

        let placeholder = Payee {
            id: PayeeId::placeholder(),
            ..stored("", "Gamma")
        };
        let adoption = block_on(adopt_new_vendor(&directory, &ctx(), placeholder));
        assert_eq!(adoption.selected, None);
        assert!(adoption.problem.as_ref().is_some_and(AppError::is_warning));

        let echoed = stored("9", "Delta");
        let adoption = block_on(adopt_new_vendor(&directory, &ctx(), echoed));
        assert_eq!(adoption.selected, Some(PayeeId::new("9")));
        assert!(adoption.payees.iter().any(|p| p.name == "Delta"));
    }
}
