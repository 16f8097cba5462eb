use crate::domain::a002_purchase_order::ui::list::PurchaseOrderList;
use crate::layout::{NotificationHost, NotificationService, Shell};
use crate::system::auth::SessionProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Toasts and confirmations for the whole app.
    provide_context(NotificationService::new());

    view! {
        <SessionProvider>
            <Shell>
                <PurchaseOrderList />
            </Shell>
            <NotificationHost />
        </SessionProvider>
    }
}
