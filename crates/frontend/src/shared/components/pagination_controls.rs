use crate::shared::pagination::Pagination;
use leptos::prelude::*;

/// Page navigation under a server-paginated table. Pages are 1-based.
#[component]
pub fn PaginationControls(
    #[prop(into)] pagination: Signal<Pagination>,

    /// Page the user asked for, which may be ahead of the last fetch
    #[prop(into)]
    requested_page: Signal<usize>,

    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,

    /// Available page sizes
    #[prop(into)]
    page_size_options: Vec<usize>,

    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let last_page = move || pagination.with(|p| p.total_pages.max(1));
    let at_first = move || disabled.get() || requested_page.get() <= 1;
    let at_last = move || disabled.get() || requested_page.get() >= last_page();

    view! {
        <div class="pagination-controls">
            <span class="pagination-summary">{move || pagination.with(Pagination::summary)}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="First page"
            >
                "«"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(requested_page.get_untracked().saturating_sub(1).max(1))
                disabled=at_first
                title="Previous page"
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || format!("Page {} of {}", requested_page.get(), last_page())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(requested_page.get_untracked() + 1)
                disabled=at_last
                title="Next page"
            >
                "›"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(last_page())
                disabled=at_last
                title="Last page"
            >
                "»"
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || pagination.with(|p| p.items_per_page.to_string())
            >
                {page_size_options
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || pagination.with(|p| p.items_per_page == size)
                            >
                                {format!("{} / page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
