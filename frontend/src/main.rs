mod api;
mod config;
mod error;
mod format;
mod model;
mod pages;
mod session;
mod summary;
mod validation;
mod widgets;

use yew::prelude::*;

use crate::{
    config::Config,
    pages::{
        auth::{ForgotPasswordPage, LoginPage, RegisterPage},
        overview::OverviewPage,
        transactions::TransactionsPage,
    },
    session::{BrowserStorage, Session},
    widgets::{icon_bar_chart, icon_log_out, icon_wallet},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Page {
    Login,
    Register,
    ForgotPassword,
    Transactions,
    Overview,
}

struct NavItem {
    label: &'static str,
    page: Page,
}

const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        label: "Home",
        page: Page::Login,
    },
    NavItem {
        label: "Register",
        page: Page::Register,
    },
    NavItem {
        label: "Forgot password",
        page: Page::ForgotPassword,
    },
    NavItem {
        label: "Transactions",
        page: Page::Transactions,
    },
    NavItem {
        label: "Overview",
        page: Page::Overview,
    },
];

#[derive(Properties, PartialEq)]
struct NavBarProps {
    active_page: Page,
    logged_in: bool,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(NavBar)]
fn nav_bar(props: &NavBarProps) -> Html {
    html! {
        <nav class="flex items-center gap-2 border-b border-border px-6 h-14 bg-[#D8E1E8]">
            <span class="flex items-center gap-2 text-[#173E63] text-xl font-black tracking-tight mr-6">
                { icon_wallet() }
                {"SpendWisely"}
            </span>
            { for NAV_ITEMS.iter().map(|item| {
                let page = item.page;
                let on_select = props.on_select.clone();
                let class = if props.active_page == page {
                    "px-3 py-1 rounded-lg bg-[#173E63] text-white text-sm font-semibold"
                } else {
                    "px-3 py-1 rounded-lg text-[#173E63] text-sm hover:bg-white/50"
                };
                html! {
                    <button class={class} onclick={Callback::from(move |_| on_select.emit(page))}>
                        if page == Page::Overview {
                            <span class="inline-flex items-center gap-1">{ icon_bar_chart() }{ item.label }</span>
                        } else {
                            { item.label }
                        }
                    </button>
                }
            }) }
            <div class="flex-1"></div>
            if props.logged_in {
                <button class="flex items-center gap-2 px-3 py-1 text-sm text-[#173E63]" onclick={{
                    let on_logout = props.on_logout.clone();
                    Callback::from(move |_| on_logout.emit(()))
                }}>
                    { icon_log_out() }
                    {"Log out"}
                </button>
            }
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo(|_| Config::from_env(), ());
    let logged_in = use_state(|| {
        Session::load(&BrowserStorage)
            .map(|session| session.logged_in)
            .unwrap_or(false)
    });
    let active_page = use_state(|| {
        if *logged_in {
            Page::Transactions
        } else {
            Page::Login
        }
    });

    let login_notice = use_state(|| None::<String>);

    let on_navigate = {
        let active_page = active_page.clone();
        let logged_in = logged_in.clone();
        let login_notice = login_notice.clone();
        Callback::from(move |page: Page| {
            if page != Page::Login {
                login_notice.set(None);
            }
            logged_in.set(
                Session::load(&BrowserStorage)
                    .map(|session| session.logged_in)
                    .unwrap_or(false),
            );
            active_page.set(page);
        })
    };

    let on_registered = {
        let on_navigate = on_navigate.clone();
        let login_notice = login_notice.clone();
        Callback::from(move |_: ()| {
            login_notice.set(Some("Account created. Please log in.".to_string()));
            on_navigate.emit(Page::Login);
        })
    };

    let on_logout = {
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: ()| {
            if let Err(error) = Session::clear(&BrowserStorage) {
                tracing::error!("Could not clear the session: {error}");
            }
            tracing::info!("Logged out");
            on_navigate.emit(Page::Login);
        })
    };

    let content = match *active_page {
        Page::Login => html! {
            <LoginPage on_navigate={on_navigate.clone()} notice={(*login_notice).clone()} />
        },
        Page::Register => html! { <RegisterPage on_registered={on_registered} /> },
        Page::ForgotPassword => html! { <ForgotPasswordPage /> },
        Page::Transactions => html! { <TransactionsPage on_navigate={on_navigate.clone()} /> },
        Page::Overview => html! { <OverviewPage on_navigate={on_navigate.clone()} /> },
    };

    html! {
        <ContextProvider<Config> context={(*config).clone()}>
            <div class="min-h-screen bg-background">
                <NavBar active_page={*active_page} logged_in={*logged_in} on_select={on_navigate} on_logout={on_logout} />
                <main>
                    { content }
                </main>
            </div>
        </ContextProvider<Config>>
    }
}

fn main() {
    let config = Config::from_env();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(config.log_level)
            .build(),
    );
    tracing::info!("Starting SpendWisely against {}", config.api_base_url);

    yew::Renderer::<App>::new().render();
}
