use crate::domain::a001_payee::api::HttpPayeeApi;
use crate::domain::a001_payee::directory::{select_visible, HttpPayeeDirectory};
use crate::layout::notifications::{report, NotificationService};
use crate::system::auth::{RequestContext, Session};
use contracts::domain::a001_payee::{Payee, PayeeId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

/// Vendor directory shared by the list filter and the create form.
#[derive(Clone, Copy)]
pub struct PayeeDirectoryHandle {
    pub directory: StoredValue<Rc<HttpPayeeDirectory>, LocalStorage>,
    pub payees: RwSignal<Vec<Payee>>,
}

impl PayeeDirectoryHandle {
    /// Refetch the location's vendors into `payees`. Without a location the
    /// list is simply emptied.
    pub fn reload(&self, session: RwSignal<Session>, notifications: NotificationService) {
        let Some(ctx) = session.with_untracked(RequestContext::from_session) else {
            self.payees.set(Vec::new());
            return;
        };
        let directory = self.directory.get_value();
        let payees = self.payees;
        spawn_local(async move {
            match directory.list(&ctx, None).await {
                Ok(list) => {
                    payees.try_set(list);
                }
                Err(e) => {
                    payees.try_set(Vec::new());
                    report(&notifications, "load vendors", &e);
                }
            }
        });
    }
}

/// Create the directory and reload it whenever the selected location changes.
pub fn use_payee_directory(
    session: RwSignal<Session>,
    notifications: NotificationService,
) -> PayeeDirectoryHandle {
    let handle = PayeeDirectoryHandle {
        directory: StoredValue::new_local(Rc::new(HttpPayeeDirectory::new(HttpPayeeApi))),
        payees: RwSignal::new(Vec::new()),
    };

    let location = Memo::new(move |_| session.with(|s| s.location_id().map(str::to_string)));
    Effect::new(move |_| {
        location.track();
        handle.reload(session, notifications);
    });

    handle
}

/// Vendor dropdown with a search box.
///
/// `payees` is the directory's list for the current location; filtering here
/// is purely local.
#[component]
pub fn PayeeSelect(
    #[prop(into)] payees: Signal<Vec<Payee>>,

    #[prop(into)] selected: Signal<Option<PayeeId>>,

    on_change: Callback<Option<PayeeId>>,

    /// Text of the "nothing selected" option
    #[prop(optional, into)]
    placeholder: Option<String>,

    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let search = RwSignal::new(String::new());
    let placeholder = placeholder.unwrap_or_else(|| "All vendors".to_string());

    let options = Memo::new(move |_| {
        let text = search.get();
        payees.with(|all| select_visible(all, Some(&text)))
    });

    view! {
        <div class="payee-select">
            <Input value=search placeholder="Search vendors" />
            <select
                disabled=move || disabled.get()
                prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                on:change=move |ev| {
                    // Reuse the directory's id so it is sent back in the shape it arrived in.
                    let chosen = PayeeId::from_string(&event_target_value(&ev)).map(|wanted| {
                        payees
                            .with_untracked(|all| all.iter().find(|p| p.id == wanted).map(|p| p.id.clone()))
                            .unwrap_or(wanted)
                    });
                    on_change.run(chosen);
                }
            >
                <option value="">{placeholder}</option>
                <For
                    each=move || options.get()
                    key=|payee| payee.id.clone()
                    children=move |payee| {
                        let id = payee.id.to_string();
                        let is_selected = {
                            let id = payee.id.clone();
                            move || selected.with(|s| s.as_ref() == Some(&id))
                        };
                        view! {
                            <option value=id selected=is_selected>
                                {payee.name}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
