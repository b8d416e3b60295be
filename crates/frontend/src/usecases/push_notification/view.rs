use contracts::usecases::push_notification::{split_by_platform, PushDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;

use super::api::{dispatch_push, report_message};
use crate::shared::icons::icon;
use crate::shared::toast::use_toasts;
use crate::system::auth::use_session;

/// Compose form that pushes a notification to the devices of the given
/// customer rows.
#[component]
pub fn PushNotificationPanel(
    /// Selected customer rows, possibly spanning several pages
    #[prop(into)]
    recipients: Signal<Vec<Value>>,
) -> impl IntoView {
    let session = use_session();
    let toasts = use_toasts();

    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());
    let is_sending = RwSignal::new(false);

    let split = Memo::new(move |_| recipients.with(|rows| split_by_platform(rows)));
    let draft = move || PushDraft {
        title: title.get(),
        body: body.get(),
        image: Some(image.get()),
    };

    let can_send = Signal::derive(move || {
        !is_sending.get() && draft().is_complete() && split.with(|s| !s.is_empty())
    });

    let on_send = move |_| {
        let draft = draft();
        let recipients = split.get_untracked();
        let client = session.client();
        is_sending.set(true);

        spawn_local(async move {
            let (report, failures) = dispatch_push(&client, &draft, &recipients).await;
            for failure in &failures {
                session.observe_failure(failure);
            }
            let message = report_message(&report, recipients.skipped);
            if report.is_success() && report.failed.is_empty() {
                toasts.success(message);
                title.set(String::new());
                body.set(String::new());
                image.set(String::new());
            } else if report.is_success() {
                toasts.info(message);
            } else {
                toasts.error(message);
            }
            is_sending.set(false);
        });
    };

    view! {
        <div class="push-panel">
            <div class="push-panel__header">
                {icon("bell")}
                <h3>"Push notification"</h3>
                <span class="push-panel__counts">
                    {move || split.with(|s| format!(
                        "{} Android, {} iOS",
                        s.android.len(),
                        s.ios.len()
                    ))}
                </span>
            </div>
            <Flex vertical=true gap=FlexGap::Small>
                <Input value=title placeholder="Title" />
                <Textarea value=body placeholder="Message" attr:rows=3 />
                <Input value=image placeholder="Image URL (optional)" />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !can_send.get())
                    on_click=on_send
                >
                    {move || if is_sending.get() { "Sending..." } else { "Send" }}
                </Button>
            </Flex>
        </div>
    }
}
