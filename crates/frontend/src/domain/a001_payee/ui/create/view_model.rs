use crate::domain::a001_payee::api::{HttpPayeeApi, PayeeApi};
use crate::layout::notifications::{report_inline, NotificationService};
use crate::shared::error::AppError;
use crate::system::auth::RequestContext;
use contracts::domain::a001_payee::{CreatePayeeDto, Payee};
use leptos::prelude::*;
use leptos::task::spawn_local;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Local checks run before `addPayee` is called.
pub fn validate_payee_form(form: &CreatePayeeDto) -> Result<(), AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::Validation("Vendor name is required".into()));
    }
    if form.phone_no.trim().is_empty() {
        return Err(AppError::Validation("Phone number is required".into()));
    }
    let email = form.email.trim();
    if !email.is_empty() && !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation(format!(
            "\"{}\" is not a valid email address",
            email
        )));
    }
    Ok(())
}

/// Validate and create the vendor for the context's location.
pub async fn submit_payee<A: PayeeApi>(
    api: &A,
    ctx: &RequestContext,
    form: &CreatePayeeDto,
) -> Result<Payee, AppError> {
    validate_payee_form(form)?;
    let dto = CreatePayeeDto {
        location_id: ctx.location_id.clone(),
        ..form.clone()
    };
    api.add_payee(ctx, &dto).await
}

/// ViewModel for the "New vendor" form
#[derive(Clone, Copy)]
pub struct CreatePayeeViewModel {
    pub form: RwSignal<CreatePayeeDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl CreatePayeeViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(CreatePayeeDto::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn reset(&self) {
        self.form.set(CreatePayeeDto::default());
        self.error.set(None);
    }

    pub fn save_command(
        &self,
        ctx: Option<RequestContext>,
        notifications: NotificationService,
        on_success: Callback<Payee>,
    ) {
        if self.saving.get_untracked() {
            return;
        }
        let Some(ctx) = ctx else {
            let text = report_inline(&notifications, "create vendor", &AppError::MissingLocation);
            self.error.set(Some(text));
            return;
        };
        let current = self.form.get_untracked();
        if let Err(e) = validate_payee_form(&current) {
            self.error.set(Some(report_inline(&notifications, "create vendor", &e)));
            return;
        }

        let vm = *self;
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = submit_payee(&HttpPayeeApi, &ctx, &current).await;
            vm.saving.try_set(false);
            match result {
                Ok(payee) => {
                    vm.form.try_set(CreatePayeeDto::default());
                    on_success.run(payee);
                }
                Err(e) => {
                    vm.error
                        .try_set(Some(report_inline(&notifications, "create vendor", &e)));
                }
            }
        });
    }
}

impl Default for CreatePayeeViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_payee::PayeeId;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeApi {
        sent: RefCell<Vec<CreatePayeeDto>>,
    }

    #[async_trait(?Send)]
    impl PayeeApi for FakeApi {
        async fn get_payees(&self, _ctx: &RequestContext) -> Result<Vec<Payee>, AppError> {
            Ok(Vec::new())
        }

        async fn add_payee(
            &self,
            _ctx: &RequestContext,
            dto: &CreatePayeeDto,
        ) -> Result<Payee, AppError> {
            self.sent.borrow_mut().push(dto.clone());
            Ok(Payee::from_create_dto(dto, PayeeId::new("p-1")))
        }
    }

    fn form(name: &str, phone: &str, email: &str) -> CreatePayeeDto {
        CreatePayeeDto {
            name: name.into(),
            phone_no: phone.into(),
            email: email.into(),
            ..CreatePayeeDto::default()
        }
    }

    fn ctx() -> RequestContext {
        RequestContext {
            location_id: "loc-7".into(),
            token: "token".into(),
        }
    }

    #[test]
    fn name_and_phone_are_required() {
        assert_eq!(
            validate_payee_form(&form("  ", "555", "")),
            Err(AppError::Validation("Vendor name is required".into()))
        );
        assert_eq!(
            validate_payee_form(&form("Acme", "", "")),
            Err(AppError::Validation("Phone number is required".into()))
        );
        assert_eq!(validate_payee_form(&form("Acme", "555-0100", "")), Ok(()));
    }

    #[test]
    fn email_is_checked_only_when_present() {
        assert!(validate_payee_form(&form("Acme", "555", "orders@acme.test")).is_ok());
        assert!(validate_payee_form(&form("Acme", "555", "orders@acme")).is_err());
        assert!(validate_payee_form(&form("Acme", "555", "not an email")).is_err());
    }

    #[test]
    fn submit_fills_location_and_skips_invalid_forms() {
        let api = FakeApi::default();
        let created = block_on(submit_payee(&api, &ctx(), &form("Acme", "555", ""))).unwrap();
        assert_eq!(created.id, PayeeId::new("p-1"));
        assert_eq!(api.sent.borrow()[0].location_id, "loc-7");

        let rejected = block_on(submit_payee(&api, &ctx(), &form("", "555", "")));
        assert!(matches!(rejected, Err(AppError::Validation(_))));
        assert_eq!(api.sent.borrow().len(), 1);
    }
}
