//! Toasts and the delete-confirmation dialog.

use crate::shared::config::TOAST_DISMISS_MS;
use crate::shared::error::AppError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::*;

/// What core components need from the notification layer.
pub trait Notifier {
    fn show_error(&self, message: &str);
    fn show_success(&self, message: &str);
    fn show_warning(&self, message: &str);
}

/// Log an error and surface it to the user with the matching severity.
pub fn report(notifier: &dyn Notifier, context: &str, err: &AppError) {
    if err.is_warning() {
        log::warn!("{}: {}", context, err);
        notifier.show_warning(&err.to_string());
    } else {
        log::error!("{}: {}", context, err);
        notifier.show_error(&err.to_string());
    }
}

/// [`report`] for forms that also show the failure next to their fields.
/// Returns the inline text.
pub fn report_inline(notifier: &dyn Notifier, context: &str, err: &AppError) -> String {
    report(notifier, context, err);
    err.to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Warning => "toast toast--warning",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Option<Callback<()>>,
}

/// Central notification store, provided once at the app root.
#[derive(Clone, Copy)]
pub struct NotificationService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    confirm: RwSignal<Option<ConfirmRequest>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            confirm: RwSignal::new(None),
        }
    }

    fn push(&self, kind: ToastKind, message: &str) {
        let mut id = 0;
        self.next_id.update_value(|n| {
            *n += 1;
            id = *n;
        });
        self.toasts.update(|t| {
            t.push(Toast {
                id,
                kind,
                message: message.to_string(),
            })
        });

        let this = *self;
        Timeout::new(TOAST_DISMISS_MS, move || this.dismiss(id)).forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.try_update(|t| t.retain(|toast| toast.id != id));
    }

    /// Ask the user to confirm a destructive action.
    pub fn show_delete_confirm(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: Callback<()>,
        on_cancel: Option<Callback<()>>,
    ) {
        self.confirm.set(Some(ConfirmRequest {
            title: title.into(),
            message: message.into(),
            on_confirm,
            on_cancel,
        }));
    }

    fn resolve_confirm(&self, confirmed: bool) {
        let Some(request) = self.confirm.get_untracked() else {
            return;
        };
        self.confirm.set(None);
        if confirmed {
            request.on_confirm.run(());
        } else if let Some(on_cancel) = request.on_cancel {
            on_cancel.run(());
        }
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationService {
    fn show_error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }

    fn show_success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn show_warning(&self, message: &str) {
        self.push(ToastKind::Warning, message);
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided in context")
}

/// Renders toasts and the pending confirmation, if any.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();
    let confirm_open = RwSignal::new(false);

    Effect::new(move |_| {
        confirm_open.set(service.confirm.with(|c| c.is_some()));
    });

    // Closing the dialog any other way counts as a cancel.
    Effect::new(move |_| {
        if !confirm_open.get() && service.confirm.with_untracked(|c| c.is_some()) {
            service.resolve_confirm(false);
        }
    });

    view! {
        <div class="toast-stack">
            <For
                each=move || service.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| service.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>

        <Dialog open=confirm_open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        {move || service.confirm.with(|c| c.as_ref().map(|r| r.title.clone()).unwrap_or_default())}
                    </DialogTitle>
                    <DialogContent>
                        {move || service.confirm.with(|c| c.as_ref().map(|r| r.message.clone()).unwrap_or_default())}
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| service.resolve_confirm(true)
                        >
                            "Delete"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| service.resolve_confirm(false)
                        >
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
