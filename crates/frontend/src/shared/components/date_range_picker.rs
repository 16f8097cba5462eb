use crate::shared::date_window::{format_range_for_display, DateRange};
use chrono::Utc;
use leptos::prelude::*;
use thaw::*;

/// Two date inputs plus quick "this month" and "previous month" buttons.
///
/// Emits a whole [`DateRange`] on every change; the owner decides what a new
/// range resets.
#[component]
pub fn DateRangePicker(
    #[prop(into)] range: Signal<DateRange>,

    on_change: Callback<DateRange>,

    #[prop(optional)] label: Option<String>,
) -> impl IntoView {
    let on_from_change = move |value: String| {
        let to = range.with_untracked(|r| r.to.clone());
        on_change.run(DateRange::new(value, to));
    };

    let on_to_change = move |value: String| {
        let from = range.with_untracked(|r| r.from.clone());
        on_change.run(DateRange::new(from, value));
    };

    let on_current_month = move |_| {
        on_change.run(DateRange::current_month(Utc::now().date_naive()));
    };

    // Relative to the range currently shown, not to today.
    let on_previous_month = move |_| {
        if let Some(previous) = range.with_untracked(DateRange::previous_month) {
            on_change.run(previous);
        }
    };

    view! {
        <div class="date-range-picker">
            {label.map(|text| view! { <Label>{text}</Label> })}
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <input
                    type="date"
                    prop:value=move || range.with(|r| r.from.clone())
                    on:change=move |ev| on_from_change(event_target_value(&ev))
                />
                <span>"-"</span>
                <input
                    type="date"
                    prop:value=move || range.with(|r| r.to.clone())
                    on:change=move |ev| on_to_change(event_target_value(&ev))
                />
                <ButtonGroup>
                    <Button size=ButtonSize::Small on_click=on_current_month>
                        "This month"
                    </Button>
                    <Button size=ButtonSize::Small on_click=on_previous_month>
                        "Previous month"
                    </Button>
                </ButtonGroup>
                <span class="date-range-picker__label">
                    {move || range.with(format_range_for_display)}
                </span>
            </Flex>
        </div>
    }
}
