pub mod state;

use crate::domain::a001_payee::ui::picker::{use_payee_directory, PayeeSelect};
use crate::domain::a002_purchase_order::api::{HttpPurchaseOrderApi, PurchaseOrderApi};
use crate::domain::a002_purchase_order::delete::{follow_up_delete, DeleteHost, DeleteTracker};
use crate::domain::a002_purchase_order::filter::StatusFilter;
use crate::domain::a002_purchase_order::query::{HttpPurchaseOrderQuery, QueryCompletion, QueryParams};
use crate::domain::a002_purchase_order::ui::create::CreatePurchaseOrderForm;
use crate::layout::notifications::report;
use crate::layout::{use_notifications, Modal, Notifier};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::{DELETE_REFETCH_DELAY_MS, PAGE_SIZE_OPTIONS};
use crate::shared::date_window::{format_for_display, DateRange};
use crate::shared::deferred::{BrowserTimers, DeferredTasks};
use crate::shared::error::AppError;
use crate::shared::number_format::format_money;
use crate::system::auth::{use_session, RequestContext};
use chrono::Utc;
use contracts::domain::a002_purchase_order::{PurchaseOrder, PurchaseOrderId};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, ListViewMode, PurchaseOrderListState};
use std::rc::Rc;
use thaw::*;

/// Delete follow-ups land in the list state and reload through the view's refetch.
#[derive(Clone, Copy)]
struct ListDeleteHost<R> {
    state: RwSignal<PurchaseOrderListState>,
    refetch: R,
}

impl<R: Fn() + 'static> DeleteHost for ListDeleteHost<R> {
    fn update_deletes(&self, f: &mut dyn FnMut(&mut DeleteTracker)) {
        self.state.try_update(|s| f(&mut s.deletes));
    }

    fn refetch(&self) {
        (self.refetch)();
    }
}

#[component]
pub fn PurchaseOrderList() -> impl IntoView {
    let session = use_session();
    let notifications = use_notifications();
    let state = create_state();
    let vendors = use_payee_directory(session, notifications);
    let show_create = RwSignal::new(false);

    let query = StoredValue::new_local(Rc::new(HttpPurchaseOrderQuery::new(HttpPurchaseOrderApi)));
    let deferred = StoredValue::new_local(DeferredTasks::new(BrowserTimers));
    on_cleanup(move || {
        let _ = deferred.try_with_value(|tasks| {
            if tasks.has_pending() {
                log!("purchase order list closed with a pending refetch; running it now");
            }
            tasks.flush();
        });
    });

    // Only the request-shaping filters; status and vendor are page-local.
    let params = Memo::new(move |_| {
        let location_id = session.with(|s| s.location_id().map(str::to_string))?;
        Some(state.with(|s| s.query_params(&location_id)))
    });

    let fetch = move |params: QueryParams| {
        let Some(ctx) = session.with_untracked(RequestContext::from_session) else {
            log!("no location or token; skipping purchase order fetch");
            return;
        };
        // May run from a flushed task after the list was torn down.
        let Some(query) = query.try_get_value() else {
            return;
        };
        let ticket = query.begin();
        state.try_update(|s| s.data.mark_loading(&params));
        spawn_local(async move {
            let result = query.run(&ctx, &params).await;
            let completion = QueryCompletion {
                ticket,
                params,
                result,
            };
            state.try_update(|s| query.settle(&mut s.data, completion));
        });
    };

    let refetch = move || {
        if let Some(current) = params.try_get_untracked().flatten() {
            fetch(current);
        }
    };

    Effect::new(move |_| match params.get() {
        Some(current) => fetch(current),
        None => log!("no location selected; purchase orders not loaded"),
    });

    let retry = move |_| {
        let last = state.with_untracked(|s| s.data.last_params.clone());
        match last.or_else(|| params.get_untracked()) {
            Some(last) => fetch(last),
            None => report(&notifications, "retry purchase orders", &AppError::MissingLocation),
        }
    };

    let clear_filters = move |_| {
        let before = params.get_untracked();
        state.update(|s| s.clear_filters(Utc::now().date_naive()));
        // Same request as before means the dependency tracking will not fire.
        if params.get_untracked() == before {
            refetch();
        }
    };

    let run_delete = move |id: PurchaseOrderId| {
        let Some(ctx) = session.with_untracked(RequestContext::from_session) else {
            state.update(|s| {
                s.deletes.cancel(&id);
            });
            report(&notifications, "delete purchase order", &AppError::MissingLocation);
            return;
        };
        if !state.try_update(|s| s.deletes.confirm(&id)).unwrap_or(false) {
            return;
        }
        let query = query.get_value();
        spawn_local(async move {
            match query.api().delete(&ctx, &id).await {
                Ok(()) => {
                    notifications.show_success("Purchase order deleted");
                    let host = ListDeleteHost { state, refetch };
                    let _ = deferred.try_with_value(|tasks| {
                        follow_up_delete(tasks, host, id, DELETE_REFETCH_DELAY_MS)
                    });
                }
                Err(e) => {
                    state.try_update(|s| s.deletes.fail(&id));
                    report(&notifications, "delete purchase order", &e);
                }
            }
        });
    };

    let request_delete = move |order: PurchaseOrder| {
        let id = order.id.clone();
        if !state.try_update(|s| s.deletes.request(&id)).unwrap_or(false) {
            return;
        }
        let label = if order.invoice_no.trim().is_empty() {
            id.to_string()
        } else {
            format!("invoice {}", order.invoice_no)
        };
        let cancel_id = id.clone();
        notifications.show_delete_confirm(
            "Delete purchase order",
            format!("Delete the purchase order for {}? This cannot be undone.", label),
            Callback::new(move |_| run_delete(id.clone())),
            Some(Callback::new(move |_| {
                state.update(|s| {
                    s.deletes.cancel(&cancel_id);
                });
            })),
        );
    };

    let on_created = Callback::new(move |_| {
        show_create.set(false);
        notifications.show_success("Purchase order created");
        refetch();
    });

    let on_date_change = Callback::new(move |range: DateRange| {
        state.update(|s| s.set_date_range(range));
    });

    let on_page_change = Callback::new(move |page: usize| {
        state.update(|s| s.page.set_page(page));
    });

    let on_page_size_change = Callback::new(move |size: usize| {
        state.update(|s| s.page.set_items_per_page(size));
    });

    let view_mode = Memo::new(move |_| state.with(|s| s.view_mode()));
    let visible_orders = Memo::new(move |_| state.with(|s| s.visible_orders()));

    view! {
        <div class="page purchase-order-list">
            <div class="page__header">
                <h1 class="page__title">"Purchase Orders"</h1>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| show_create.set(true)
                    disabled=Signal::derive(move || params.with(Option::is_none))
                >
                    "New purchase order"
                </Button>
            </div>

            <div class="filter-panel">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <DateRangePicker
                        range=Signal::derive(move || state.with(|s| s.date_range.clone()))
                        on_change=on_date_change
                        label="Date".to_string()
                    />
                    <div class="form-group">
                        <Label>"Status"</Label>
                        <select
                            prop:value=move || state.with(|s| s.status_filter.as_str())
                            on:change=move |ev| {
                                let filter = StatusFilter::parse(&event_target_value(&ev));
                                state.update(|s| s.status_filter = filter);
                            }
                        >
                            {StatusFilter::OPTIONS
                                .into_iter()
                                .map(|option| {
                                    view! {
                                        <option
                                            value=option.as_str()
                                            selected=move || state.with(|s| s.status_filter == option)
                                        >
                                            {option.as_str()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <Label>"Vendor"</Label>
                        <PayeeSelect
                            payees=vendors.payees
                            selected=Signal::derive(move || state.with(|s| s.selected_payee.clone()))
                            on_change=Callback::new(move |id| state.update(|s| s.selected_payee = id))
                        />
                    </div>
                    <Button appearance=ButtonAppearance::Secondary on_click=clear_filters>
                        "Clear Filters"
                    </Button>
                </Flex>
            </div>

            {move || match view_mode.get() {
                ListViewMode::Loading => {
                    view! { <div class="list-loading">"Loading purchase orders..."</div> }.into_any()
                }
                ListViewMode::Error => {
                    let (message, retryable) = state.with(|s| {
                        s.data
                            .error
                            .as_ref()
                            .map(|e| (e.to_string(), e.is_retryable()))
                            .unwrap_or_default()
                    });
                    view! {
                        <div class="error list-error">
                            <span>{message}</span>
                            <Show when=move || retryable>
                                <Button appearance=ButtonAppearance::Secondary on_click=retry>
                                    "Try Again"
                                </Button>
                            </Show>
                        </div>
                    }
                        .into_any()
                }
                ListViewMode::Data => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Date"</th>
                                    <th>"Vendor"</th>
                                    <th>"Invoice #"</th>
                                    <th>"Payment"</th>
                                    <th class="text-right">"Cost"</th>
                                    <th class="text-right">"Retail"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || visible_orders.with(Vec::is_empty)>
                                    <tr>
                                        <td colspan="8" class="table__empty">
                                            "No purchase orders for the selected filters"
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || visible_orders.get()
                                    key=|order| order.id.clone()
                                    children=move |order| {
                                        let id = order.id.clone();
                                        let row_class = {
                                            let id = id.clone();
                                            move || {
                                                if state.with(|s| s.deletes.is_marked(&id)) {
                                                    "row row--deleting"
                                                } else {
                                                    "row"
                                                }
                                            }
                                        };
                                        let busy = {
                                            let id = id.clone();
                                            Signal::derive(move || state.with(|s| s.deletes.is_busy(&id)))
                                        };
                                        let status = order.status_label();
                                        let payment = order
                                            .payment_type()
                                            .map(|pt| pt.label())
                                            .unwrap_or("-");
                                        let for_delete = order.clone();
                                        view! {
                                            <tr class=row_class>
                                                <td>{format_for_display(&order.date)}</td>
                                                <td>{order.payee_name().to_string()}</td>
                                                <td>{order.invoice_no.clone()}</td>
                                                <td>{payment}</td>
                                                <td class="text-right">{format_money(&order.total)}</td>
                                                <td class="text-right">{format_money(&order.retail)}</td>
                                                <td>
                                                    <span class=format!("status status--{}", status.as_str().to_lowercase())>
                                                        {status.as_str()}
                                                    </span>
                                                </td>
                                                <td>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        size=ButtonSize::Small
                                                        disabled=busy
                                                        on_click=move |_| request_delete(for_delete.clone())
                                                    >
                                                        "Delete"
                                                    </Button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                            <tfoot>
                                <tr class="table__totals">
                                    <td colspan="4">"Total for period"</td>
                                    <td class="text-right">
                                        {move || state.with(|s| format_money(&s.data.totals.cost))}
                                    </td>
                                    <td class="text-right">
                                        {move || state.with(|s| format_money(&s.data.totals.retail))}
                                    </td>
                                    <td colspan="2"></td>
                                </tr>
                            </tfoot>
                        </table>
                    }
                        .into_any()
                }
            }}

            <PaginationControls
                pagination=Signal::derive(move || state.with(|s| s.data.pagination))
                requested_page=Signal::derive(move || state.with(|s| s.page.current_page))
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                disabled=Signal::derive(move || view_mode.get() == ListViewMode::Loading)
            />

            <Modal open=show_create>
                <CreatePurchaseOrderForm
                    vendors=vendors
                    on_created=on_created
                    on_cancel=Callback::new(move |_| show_create.set(false))
                />
            </Modal>
        </div>
    }
}
