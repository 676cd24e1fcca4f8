use leptos::prelude::*;

/// Form action button. `variant` is "primary" (default), "secondary" or
/// "danger".
#[component]
pub fn Button(
    #[prop(optional, into)] variant: MaybeProp<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] on_click: Option<Callback<leptos::ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let class = move || match variant.get().as_deref() {
        Some("secondary") => "button button--secondary",
        Some("danger") => "button button--danger",
        _ => "button button--primary",
    };

    view! {
        <button
            type="button"
            class=class
            disabled=move || disabled.get()
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
