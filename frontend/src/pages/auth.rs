//! Log in, register and forgot-password forms.

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    Page, api,
    config::Config,
    session::{BrowserStorage, Session},
    validation::{
        can_submit_login, can_submit_password_reset, can_submit_registration, validate_email,
        validate_login, validate_registration,
    },
    widgets::{Alert, AlertKind},
};

const LOGIN_FAILED: &str = "Login failed. Please check your email and password.";
const REGISTER_FAILED: &str = "An unexpected error occurred. Please try again.";

const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";
const SUBMIT_CLASS: &str = "w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-50";
const LINK_CLASS: &str = "text-primary font-semibold";

fn text_input(kind: &'static str, placeholder: &'static str, value: &UseStateHandle<String>) -> Html {
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };

    html! {
        <input type={kind} class={INPUT_CLASS} placeholder={placeholder} value={(**value).clone()} oninput={oninput} />
    }
}

fn card(title: &'static str, body: Html) -> Html {
    html! {
        <div class="flex justify-center pt-16">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <h2 class="text-2xl font-bold text-foreground text-center mb-6">{ title }</h2>
                { body }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub on_navigate: Callback<Page>,
    /// Shown above the form, e.g. after registering.
    #[prop_or_default]
    pub notice: Option<String>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let is_valid = can_submit_login(&email, &password);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_navigate = props.on_navigate.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *loading {
                return;
            }

            let request = match validate_login(&email, &password) {
                Ok(request) => request,
                Err(validation_error) => {
                    error.set(Some(validation_error.to_string()));
                    return;
                }
            };

            loading.set(true);
            error.set(None);

            let config = config.clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                let result = match api::login(&config, &request).await {
                    Ok(user) => Session::new(user.user_id, user.name).save(&BrowserStorage),
                    Err(login_error) => Err(login_error),
                };

                loading.set(false);
                match result {
                    Ok(()) => {
                        tracing::info!("Logged in as {}", request.email);
                        on_navigate.emit(Page::Transactions);
                    }
                    Err(login_error) => {
                        tracing::error!("There was an error logging in: {login_error}");
                        error.set(Some(login_error.user_message(LOGIN_FAILED)));
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let go_to = |page: Page| {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(page))
    };

    card(
        "Welcome to SpendWisely!",
        html! {
            <form class="space-y-4" onsubmit={on_submit}>
                <Alert message={props.notice.clone()} kind={AlertKind::Info} />
                { text_input("text", "Enter your email", &email) }
                { text_input("password", "Enter your password", &password) }
                <Alert message={(*error).clone()} on_dismiss={on_dismiss} />
                <button type="submit" class={SUBMIT_CLASS} disabled={*loading || !is_valid}>
                    { if *loading { "Please wait..." } else { "Login" } }
                </button>
                <p class="flex justify-between text-sm mt-3">
                    <button type="button" class={LINK_CLASS} onclick={go_to(Page::Register)}>
                        {"Not enrolled? Sign up now!"}
                    </button>
                    <button type="button" class={LINK_CLASS} onclick={go_to(Page::ForgotPassword)}>
                        {"Forgot password?"}
                    </button>
                </p>
            </form>
        },
    )
}

#[derive(Properties, PartialEq)]
pub struct RegisterPageProps {
    pub on_registered: Callback<()>,
}

#[function_component(RegisterPage)]
pub fn register_page(props: &RegisterPageProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let is_valid = can_submit_registration(&name, &email, &password);

    let on_submit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_registered = props.on_registered.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *loading {
                return;
            }

            let request = match validate_registration(&name, &email, &password) {
                Ok(request) => request,
                Err(validation_error) => {
                    error.set(Some(validation_error.to_string()));
                    return;
                }
            };

            loading.set(true);
            error.set(None);

            let config = config.clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_registered = on_registered.clone();
            spawn_local(async move {
                let result = api::register(&config, &request).await;
                loading.set(false);

                match result {
                    Ok(()) => {
                        tracing::info!("Registered {}", request.email);
                        on_registered.emit(());
                    }
                    Err(register_error) => {
                        tracing::error!("There was an error registering: {register_error}");
                        error.set(Some(register_error.user_message(REGISTER_FAILED)));
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    card(
        "Register",
        html! {
            <form class="space-y-4" onsubmit={on_submit}>
                <Alert message={(*error).clone()} on_dismiss={on_dismiss} />
                { text_input("text", "Enter your name", &name) }
                { text_input("email", "Enter your email", &email) }
                { text_input("password", "Enter your password", &password) }
                <button type="submit" class={SUBMIT_CLASS} disabled={*loading || !is_valid}>
                    { if *loading { "Please wait..." } else { "Register" } }
                </button>
            </form>
        },
    )
}

#[function_component(ForgotPasswordPage)]
pub fn forgot_password_page() -> Html {
    let email = use_state(String::new);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);

    let is_valid = can_submit_password_reset(&email);

    let on_submit = {
        let email = email.clone();
        let error = error.clone();
        let notice = notice.clone();

        // There is no reset endpoint, so nothing is sent.
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            match validate_email(&email) {
                Ok(address) => {
                    error.set(None);
                    notice.set(Some(format!(
                        "Password resets are not available online yet. If an account exists for {address}, contact support to reset it."
                    )));
                }
                Err(validation_error) => {
                    notice.set(None);
                    error.set(Some(validation_error.to_string()));
                }
            }
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    card(
        "Forgot password",
        html! {
            <form class="space-y-4" onsubmit={on_submit}>
                { text_input("email", "Enter your email", &email) }
                <Alert message={(*error).clone()} on_dismiss={on_dismiss} />
                <Alert message={(*notice).clone()} kind={AlertKind::Info} />
                <button type="submit" class={SUBMIT_CLASS} disabled={!is_valid}>{"Reset Password"}</button>
            </form>
        },
    )
}
