//! Sidebar navigation, one collapsible group per area of the panel.

use contracts::domain::resource::ResourceKind;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::domain::layout_config::EDITABLE_PAGES;
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(String, String)>, // (href, label)
}

fn group_icon(group: &str) -> &'static str {
    match group {
        "Catalog" => "catalog",
        "Merchandising" => "merchandising",
        "Marketing" => "marketing",
        "Sales" => "orders",
        _ => "layout",
    }
}

fn menu_groups() -> Vec<MenuGroup> {
    let mut groups = vec![MenuGroup {
        id: "overview",
        label: "Overview",
        icon: "dashboard",
        items: vec![("/".to_string(), "Dashboard".to_string())],
    }];

    for kind in ResourceKind::ALL {
        let item = (format!("/catalog/{}", kind.slug()), kind.title().to_string());
        match groups.iter_mut().find(|g| g.label == kind.group()) {
            Some(group) => group.items.push(item),
            None => groups.push(MenuGroup {
                id: kind.group(),
                label: kind.group(),
                icon: group_icon(kind.group()),
                items: vec![item],
            }),
        }
    }

    groups.push(MenuGroup {
        id: "layout",
        label: "Page layout",
        icon: "layout",
        items: EDITABLE_PAGES
            .iter()
            .map(|(page, title)| (format!("/layout/{}", page), title.to_string()))
            .collect(),
    });
    groups
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let groups = menu_groups();
    let expanded_groups = RwSignal::new(groups.iter().map(|g| g.id).collect::<Vec<_>>());

    view! {
        <nav class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let group_id = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            on:click=move |_| {
                                expanded_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| *x == group_id) {
                                        items.remove(pos);
                                    } else {
                                        items.push(group_id);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.with(|g| g.contains(&group_id))
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.with(|g| g.contains(&group_id))>
                            <div class="app-sidebar__children">
                                {group.items.clone().into_iter().map(|(href, label)| {
                                    let target = href.clone();
                                    view! {
                                        <A href=href attr:class="app-sidebar__link">
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || location.pathname.with(|p| *p == target)
                                            >
                                                <span>{label}</span>
                                            </div>
                                        </A>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_resource_listed_once() {
        let groups = menu_groups();
        for kind in ResourceKind::ALL {
            let href = format!("/catalog/{}", kind.slug());
            let hits = groups
                .iter()
                .flat_map(|g| g.items.iter())
                .filter(|(h, _)| *h == href)
                .count();
            assert_eq!(hits, 1, "{:?}", kind);
        }
        assert_eq!(groups[0].items[0].0, "/");
        assert_eq!(groups.last().map(|g| g.id), Some("layout"));
    }
}
