pub mod modal;
pub mod notifications;

pub use modal::Modal;
pub use notifications::{use_notifications, NotificationHost, NotificationService, Notifier};

use crate::system::auth::use_session;
use leptos::prelude::*;

/// Application shell: a top bar with the active location above the page.
///
/// ```text
/// +------------------------------------------+
/// |  Back Office               Location name |
/// +------------------------------------------+
/// |                 content                  |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let session = use_session();

    view! {
        <div class="app-layout">
            <header class="top-header">
                <span class="top-header__title">"Back Office"</span>
                <span class="top-header__location">
                    {move || {
                        session.with(|s| {
                            if s.location_id().is_some() {
                                s.location_name().to_string()
                            } else {
                                "No location selected".to_string()
                            }
                        })
                    }}
                </span>
            </header>
            <main class="app-main">
                {children()}
            </main>
        </div>
    }
}
