use leptos::prelude::*;

/// Overlay modal bound to an `open` flag owned by the caller.
///
/// Clicking the overlay closes it; clicks inside the content do not bubble.
/// ```text
/// let open = RwSignal::new(false);
/// view! { <Modal open=open><MyForm /></Modal> }
/// ```
#[component]
pub fn Modal(open: RwSignal<bool>, children: ChildrenFn) -> impl IntoView {
    view! {
        {move || {
            if open.get() {
                view! {
                    <div
                        class="modal-overlay"
                        on:click=move |_| open.set(false)
                    >
                        <div
                            class="modal-content"
                            on:click=|e| e.stop_propagation()
                        >
                            {children()}
                        </div>
                    </div>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }
        }}
    }
}
