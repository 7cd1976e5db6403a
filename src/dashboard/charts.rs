//! Chart generation and rendering for the dashboard.
//!
//! Builds the monthly expenses bar chart as an ECharts configuration and the
//! markup and JavaScript needed to initialize it in the browser.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::MonthlyTotal,
    html::{HeadElement, format_month_label},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container the chart is drawn into.
pub(super) fn chart_container(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[320px] w-full rounded dark:bg-gray-100"
        {}
    )
}

/// Shown in place of the chart when there are no transactions to plot.
pub(super) fn chart_empty_state() -> Markup {
    html! {
        div class="min-h-[320px] flex items-center justify-center text-gray-500"
        {
            div class="text-center"
            {
                p class="text-sm" { "No data to display" }
                p class="text-xs text-gray-400 mt-1" { "Add transactions to see your monthly expenses" }
            }
        }
    }
}

/// Generates the JavaScript that initializes the chart, with dark mode
/// support and responsive resizing.
pub(super) fn chart_script(chart: &DashboardChart) -> HeadElement {
    let script_content = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#,
        chart.id, chart.options
    );

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Bar chart of total spending per month over the tail of the collection's
/// history, one bar per entry of `series`.
pub(super) fn monthly_expenses_chart(series: &[MonthlyTotal]) -> Chart {
    let labels: Vec<String> = series
        .iter()
        .map(|entry| format_month_label(entry.month))
        .collect();
    let values: Vec<f64> = series.iter().map(|entry| entry.total_abs).collect();

    Chart::new()
        .title(Title::new().text("Monthly Expenses").subtext("Last six months"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Expenses").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
