pub mod sidebar;
pub mod top_bar;

use leptos::prelude::*;
use sidebar::Sidebar;
use top_bar::TopBar;

/// Application frame: top bar, sidebar and the routed page.
///
/// ```text
/// +------------------------------+
/// |            TopBar            |
/// +---------+--------------------+
/// | Sidebar |      content       |
/// +---------+--------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopBar />
            <div class="app-body">
                <aside class="app-sidebar">
                    <Sidebar />
                </aside>
                <main class="app-main">
                    {children()}
                </main>
            </div>
        </div>
    }
}
