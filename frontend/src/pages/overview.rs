//! Current balance and an income vs. expenses bar chart.

use yew::prelude::*;

use super::{TransactionList, refresh_transactions};
use crate::{
    Page,
    config::Config,
    format::format_currency,
    session::{BrowserStorage, Session},
    summary::{Bar, Totals, bar_chart},
    widgets::{Alert, page_shell},
};

const CHART_WIDTH: u32 = 500;
const CHART_HEIGHT: u32 = 300;
const BAR_WIDTH: u32 = 120;
const AXIS_MARGIN: u32 = 40;

#[derive(Properties, PartialEq)]
struct BarChartProps {
    totals: Totals,
}

#[function_component(BarChart)]
fn bar_chart_view(props: &BarChartProps) -> Html {
    let bars = bar_chart(&props.totals);
    let plot_height = CHART_HEIGHT - 2 * AXIS_MARGIN;
    let baseline = CHART_HEIGHT - AXIS_MARGIN;
    let slot = (CHART_WIDTH - 2 * AXIS_MARGIN) / bars.len() as u32;

    let draw = |index: usize, bar: &Bar| {
        let height = plot_height * bar.percent / 100;
        let x = AXIS_MARGIN + slot * index as u32 + (slot - BAR_WIDTH) / 2;
        let y = baseline - height;
        let center = x + BAR_WIDTH / 2;

        html! {
            <g>
                <rect x={x.to_string()} y={y.to_string()} width={BAR_WIDTH.to_string()} height={height.to_string()} fill={bar.color} />
                <text x={center.to_string()} y={(y.saturating_sub(8)).to_string()} text-anchor="middle" font-size="16">
                    { format_currency(bar.value) }
                </text>
                <text x={center.to_string()} y={(baseline + 24).to_string()} text-anchor="middle" font-size="20">
                    { bar.label }
                </text>
            </g>
        }
    };

    html! {
        <svg class="w-full" viewBox={format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}")} role="img" aria-label="Income and expenses">
            { for bars.iter().enumerate().map(|(index, bar)| draw(index, bar)) }
            <line x1={AXIS_MARGIN.to_string()} y1={baseline.to_string()}
                x2={(CHART_WIDTH - AXIS_MARGIN).to_string()} y2={baseline.to_string()}
                stroke="currentColor" />
        </svg>
    }
}

#[derive(Properties, PartialEq)]
pub struct OverviewPageProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(OverviewPage)]
pub fn overview_page(props: &OverviewPageProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let transactions = use_reducer(TransactionList::default);
    let loaded = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let transactions = transactions.clone();
        let loaded = loaded.clone();
        let error = error.clone();
        let on_navigate = props.on_navigate.clone();

        use_effect_with_deps(
            move |_| {
                match Session::require(&BrowserStorage) {
                    Ok(session) => {
                        refresh_transactions(config, session.user_id, transactions, loaded, error)
                    }
                    Err(_) => {
                        tracing::info!("No session, redirecting to the login page");
                        on_navigate.emit(Page::Login);
                    }
                }
                || ()
            },
            (),
        );
    }

    let totals = Totals::from_transactions(&transactions.transactions);

    html! {
        { page_shell(
            "Financial overview",
            html! {},
            html! {
                <>
                    <h2 class="text-center text-2xl font-bold">
                        { format!("Current Balance: {}", format_currency(totals.balance())) }
                    </h2>
                    <Alert message={(*error).clone()} />
                    if *loaded {
                        <BarChart totals={totals} />
                    } else {
                        <p class="text-center text-muted-foreground">{"Loading..."}</p>
                    }
                </>
            }
        ) }
    }
}
