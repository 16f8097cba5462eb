pub mod view_model;

use crate::domain::a001_payee::ui::create::CreatePayeeForm;
use crate::domain::a001_payee::ui::picker::{PayeeDirectoryHandle, PayeeSelect};
use crate::layout::notifications::report;
use crate::layout::{use_notifications, Modal, Notifier};
use crate::system::auth::{use_session, RequestContext};
use chrono::Utc;
use contracts::domain::a001_payee::Payee;
use contracts::domain::a002_purchase_order::PaymentType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use view_model::{adopt_new_vendor, CreatePurchaseOrderViewModel};

#[component]
pub fn CreatePurchaseOrderForm(
    vendors: PayeeDirectoryHandle,
    /// Called after the order was stored
    on_created: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let notifications = use_notifications();
    let vm = CreatePurchaseOrderViewModel::new(Utc::now().date_naive());

    let on_save = move |_| {
        let ctx = session.with_untracked(RequestContext::from_session);
        vm.save_command(ctx, notifications, on_created);
    };

    let on_vendor_created = Callback::new(move |created: Payee| {
        vm.show_new_vendor.set(false);
        notifications.show_success(&format!("Vendor \"{}\" created", created.name));
        let Some(ctx) = session.with_untracked(RequestContext::from_session) else {
            return;
        };
        let directory = vendors.directory.get_value();
        spawn_local(async move {
            let adoption = adopt_new_vendor(&directory, &ctx, created).await;
            vendors.payees.try_set(adoption.payees);
            if let Some(id) = adoption.selected {
                vm.form.try_update(|f| f.payee_id = Some(id));
            }
            if let Some(problem) = adoption.problem {
                report(&notifications, "select new vendor", &problem);
            }
        });
    });

    view! {
        <div class="details-container purchase-order-create">
            <div class="details-header">
                <h3>"New purchase order"</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="po-date">"Date *"</label>
                    <input
                        type="date"
                        id="po-date"
                        prop:value=move || vm.form.with(|f| f.date.clone())
                        on:change=move |ev| vm.form.update(|f| f.date = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label>"Vendor *"</label>
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <PayeeSelect
                            payees=vendors.payees
                            selected=Signal::derive(move || vm.form.with(|f| f.payee_id.clone()))
                            on_change=Callback::new(move |id| vm.form.update(|f| f.payee_id = id))
                            placeholder="Select a vendor"
                        />
                        <Button
                            appearance=ButtonAppearance::Subtle
                            size=ButtonSize::Small
                            on_click=move |_| vm.show_new_vendor.set(true)
                        >
                            "New vendor"
                        </Button>
                    </Flex>
                </div>

                <div class="form-group">
                    <label for="po-invoice">"Invoice # *"</label>
                    <input
                        type="text"
                        id="po-invoice"
                        prop:value=move || vm.form.with(|f| f.invoice_no.clone())
                        on:input=move |ev| vm.form.update(|f| f.invoice_no = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="po-payment">"Payment type *"</label>
                    <select
                        id="po-payment"
                        prop:value=move || vm.form.with(|f| f.payment_type.to_string())
                        on:change=move |ev| {
                            let code = event_target_value(&ev).parse::<u8>().unwrap_or(0);
                            vm.form.update(|f| f.payment_type = code);
                        }
                    >
                        {PaymentType::ALL
                            .into_iter()
                            .map(|pt| {
                                let code = pt.code();
                                view! {
                                    <option
                                        value=code.to_string()
                                        selected=move || vm.form.with(|f| f.payment_type == code)
                                    >
                                        {pt.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
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
                    on_click=move |_| on_cancel.run(())
                    disabled=Signal::derive(move || vm.saving.get())
                >
                    "Cancel"
                </Button>
            </Flex>

            <Modal open=vm.show_new_vendor>
                <CreatePayeeForm
                    on_success=on_vendor_created
                    on_cancel=Callback::new(move |_| vm.show_new_vendor.set(false))
                />
            </Modal>
        </div>
    }
}
