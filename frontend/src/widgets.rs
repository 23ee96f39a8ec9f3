//! Small view helpers shared by the pages.

use yew::prelude::*;

pub fn page_shell(title: &str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-5xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title.to_string() }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: Option<String>,
    /// Set to make the alert dismissible.
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
    #[prop_or(AlertKind::Error)]
    pub kind: AlertKind,
}

#[derive(Clone, Copy, PartialEq)]
pub enum AlertKind {
    Error,
    Info,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    let class = match props.kind {
        AlertKind::Error => "flex items-center justify-between rounded-lg bg-red-50 text-red-600 text-sm px-4 py-2",
        AlertKind::Info => "flex items-center justify-between rounded-lg bg-green-50 text-green-700 text-sm px-4 py-2",
    };

    html! {
        <div class={class} role="alert">
            <span>{ message }</span>
            if let Some(on_dismiss) = props.on_dismiss.clone() {
                <button type="button" aria-label="Close" class="ml-4 font-bold"
                    onclick={Callback::from(move |_| on_dismiss.emit(()))}>
                    { "×" }
                </button>
            }
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}
