pub mod view_model;

use crate::layout::use_notifications;
use crate::system::auth::{use_session, RequestContext};
use contracts::domain::a001_payee::{CreatePayeeDto, Payee};
use leptos::prelude::*;
use thaw::*;
use view_model::CreatePayeeViewModel;

fn text_field(
    vm: CreatePayeeViewModel,
    id: &'static str,
    label: &'static str,
    get: fn(&CreatePayeeDto) -> String,
    set: fn(&mut CreatePayeeDto, String),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type="text"
                id=id
                prop:value=move || vm.form.with(get)
                on:input=move |ev| vm.form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}

/// "New vendor" form. Calls `on_success` with the created vendor, whose id may
/// still be a placeholder.
#[component]
pub fn CreatePayeeForm(on_success: Callback<Payee>, on_cancel: Callback<()>) -> impl IntoView {
    let session = use_session();
    let notifications = use_notifications();
    let vm = CreatePayeeViewModel::new();

    let on_save = move |_| {
        let ctx = session.with_untracked(RequestContext::from_session);
        vm.save_command(ctx, notifications, on_success);
    };
    let on_close = move |_| {
        vm.reset();
        on_cancel.run(());
    };

    view! {
        <div class="details-container payee-create">
            <div class="details-header">
                <h3>"New vendor"</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                {text_field(vm, "payee-name", "Name *", |f| f.name.clone(), |f, v| f.name = v)}
                {text_field(vm, "payee-phone", "Phone *", |f| f.phone_no.clone(), |f, v| f.phone_no = v)}
                {text_field(vm, "payee-email", "Email", |f| f.email.clone(), |f, v| f.email = v)}
                {text_field(vm, "payee-contact", "Contact name", |f| f.contact_name.clone(), |f, v| f.contact_name = v)}
                {text_field(vm, "payee-fax", "Fax", |f| f.fax.clone(), |f, v| f.fax = v)}
                {text_field(vm, "payee-address1", "Address", |f| f.address1.clone(), |f, v| f.address1 = v)}
                {text_field(vm, "payee-address2", "Address line 2", |f| f.address2.clone(), |f, v| f.address2 = v)}
                {text_field(vm, "payee-city", "City", |f| f.city.clone(), |f, v| f.city = v)}
                {text_field(vm, "payee-state", "State", |f| f.state.clone(), |f, v| f.state = v)}
                {text_field(vm, "payee-zip", "Zip code", |f| f.zip_code.clone(), |f, v| f.zip_code = v)}
                {text_field(vm, "payee-account", "Account no.", |f| f.account_no.clone(), |f, v| f.account_no = v)}
                {text_field(vm, "payee-payment", "Payment method", |f| f.payment_method.clone(), |f, v| f.payment_method = v)}
            </div>

            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_save
                    disabled=Signal::derive(move || vm.saving.get())
                >
                    {move || if vm.saving.get() { "Saving..." } else { "Save" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=on_close
                    disabled=Signal::derive(move || vm.saving.get())
                >
                    "Cancel"
                </Button>
            </Flex>
        </div>
    }
}
