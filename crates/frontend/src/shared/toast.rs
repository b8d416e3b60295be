use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

/// Toasts disappear on their own after this long.
pub const TOAST_TIMEOUT_MS: u32 = 4_000;
const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Info => "toast toast--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastList {
    items: Vec<Toast>,
}

impl ToastList {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<ToastList>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(ToastList::default()),
        }
    }

    fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let mut id = Uuid::nil();
        self.toasts.update(|list| id = list.push(kind, message));

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            toasts.update(|list| {
                list.dismiss(id);
            });
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|list| {
            list.dismiss(id);
        });
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

#[component]
pub fn Toaster() -> impl IntoView {
    let service = use_toasts();

    view! {
        <div class="toaster">
            <For
                each=move || service.toasts.get().items().to_vec()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="status">
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="toast__close"
                                aria-label="Dismiss"
                                on:click=move |_| service.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut list = ToastList::default();
        let a = list.push(ToastKind::Success, "Saved");
        let b = list.push(ToastKind::Error, "Failed");
        assert_ne!(a, b);
        assert!(list.dismiss(a));
        assert!(!list.dismiss(a));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].message, "Failed");
    }

    #[test]
    fn test_oldest_toast_dropped_when_full() {
        let mut list = ToastList::default();
        for i in 0..=MAX_VISIBLE {
            list.push(ToastKind::Info, format!("toast {}", i));
        }
        assert_eq!(list.items().len(), MAX_VISIBLE);
        assert_eq!(list.items()[0].message, "toast 1");
    }
}
