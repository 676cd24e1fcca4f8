use contracts::shared::validation::SectionStatus;
use leptos::prelude::*;

/// Inline status label; `variant` is "primary" or "neutral" (default)
#[component]
pub fn Badge(#[prop(optional, into)] variant: MaybeProp<String>, children: Children) -> impl IntoView {
    let class = move || match variant.get().as_deref() {
        Some("primary") => "badge badge--primary",
        _ => "badge badge--neutral",
    };

    view! {
        <span class=class>
            {children()}
        </span>
    }
}

/// Completion badge of a form section
#[component]
pub fn SectionBadge(
    #[prop(into)]
    status: Signal<SectionStatus>,
) -> impl IntoView {
    let status_class = move || match status.get() {
        SectionStatus::Complete => "badge badge--status badge--success",
        SectionStatus::Required => "badge badge--status badge--warning",
        SectionStatus::NotApplicable => "badge badge--status badge--neutral",
    };
    let text = move || match status.get() {
        SectionStatus::Complete => "Complete",
        SectionStatus::Required => "Required",
        SectionStatus::NotApplicable => "Not applicable",
    };

    view! {
        <span class=status_class>
            {text}
        </span>
    }
}
