use crate::chart::{self, Viewport};
use crate::finance::{STOCK_DATES, STOCK_SERIES};
use crate::types::Toast;
use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use dioxus::prelude::*;
use once_cell::sync::Lazy;
use std::time::Duration;
use time::Date;
use time::format_description::FormatItem;
use time::macros::format_description;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

const DAY_HEADING_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none]");
const SHORT_DAY_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none]");

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
});

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

/// `May 8`
pub fn day_heading(date: Date) -> String {
    date.format(DAY_HEADING_FORMAT).unwrap_or_default()
}

pub fn short_day(date: Date) -> String {
    date.format(SHORT_DAY_FORMAT).unwrap_or_default()
}

pub fn amount_class(cents: i64) -> &'static str {
    if cents < 0 { "amount negative" } else { "amount positive" }
}

/// Timer that works in the webview as well as on native runtimes.
pub async fn sleep(duration: Duration) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(duration).await;
    }
    #[cfg(target_arch = "wasm32")]
    {
        let script = format!(
            "await new Promise((r) => setTimeout(r, {})); dioxus.send(true);",
            duration.as_millis()
        );
        let mut eval = document::eval(&script);
        let _ = eval.recv::<bool>().await;
    }
}

#[derive(Clone, PartialEq)]
struct ToastEntry {
    id: u64,
    toast: Toast,
}

/// Handle for raising notifications from anywhere below `ToastHost`.
#[derive(Clone, Copy)]
pub struct Toaster {
    entries: Signal<Vec<ToastEntry>>,
    next_id: Signal<u64>,
}

impl Toaster {
    pub fn show(&self, toast: Toast) {
        let mut entries = self.entries;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        entries.with_mut(|list| list.push(ToastEntry { id, toast }));

        spawn(async move {
            sleep(TOAST_LIFETIME).await;
            entries.with_mut(|list| list.retain(|entry| entry.id != id));
        });
    }
}

pub fn use_toaster_provider() -> Toaster {
    let entries = use_signal(Vec::<ToastEntry>::new);
    let next_id = use_signal(|| 0u64);
    use_context_provider(|| Toaster { entries, next_id })
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}

#[component]
pub fn ToastHost() -> Element {
    let toaster = use_toaster();
    let mut entries = toaster.entries;

    rsx! {
        div { class: "toast-stack",
            for entry in entries() {
                div { key: "{entry.id}", class: "toast",
                    onclick: move |_| entries.with_mut(|list| list.retain(|e| e.id != entry.id)),
                    div { class: "toast-title", "{entry.toast.title}" }
                    div { class: "toast-description", "{entry.toast.description}" }
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartLine {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

const CHART_VIEW: Viewport = Viewport::new(360.0, 180.0, 12.0);

/// Multi-series line chart with a shared y axis and an optional legend.
#[component]
pub fn LineChart(
    lines: Vec<ChartLine>,
    labels: Vec<String>,
    #[props(default = true)] legend: bool,
    #[props(default = "line-chart")] class: &'static str,
) -> Element {
    let Some(bounds) = chart::bounds(lines.iter().map(|l| l.values.as_slice())) else {
        return rsx! { div { class: "chart-empty", "No data for this period" } };
    };
    let grid: Vec<(f64, f64)> = chart::ticks(bounds, 4)
        .into_iter()
        .map(|value| {
            let y = chart::points(&[value], bounds, CHART_VIEW)
                .first()
                .map(|&(_, y)| y)
                .unwrap_or_default();
            (value, y)
        })
        .collect();
    let first_label = labels.first().cloned().unwrap_or_default();
    let last_label = labels.last().cloned().unwrap_or_default();

    rsx! {
        div { class: "{class}",
            svg {
                view_box: CHART_VIEW.view_box(),
                preserve_aspect_ratio: "none",
                for (value, y) in grid {
                    line {
                        class: "chart-grid",
                        x1: "0", x2: "{CHART_VIEW.width}",
                        y1: "{y}", y2: "{y}",
                    }
                    text { class: "chart-tick", x: "2", y: "{y - 2.0}", "{value:.0}" }
                }
                for line in lines.iter() {
                    polyline {
                        fill: "none",
                        stroke: line.color,
                        stroke_width: "2",
                        points: chart::polyline(&line.values, bounds, CHART_VIEW),
                    }
                }
            }
            div { class: "chart-axis",
                span { "{first_label}" }
                span { "{last_label}" }
            }
            if legend {
                div { class: "chart-legend",
                    for line in lines.iter() {
                        span { class: "legend-item",
                            span { class: "legend-dot", style: "background: {line.color}" }
                            "{line.name}"
                        }
                    }
                }
            }
        }
    }
}

/// Apple, Amazon and Boeing prices side by side.
#[component]
pub fn StockChart() -> Element {
    let lines = STOCK_SERIES
        .iter()
        .map(|series| ChartLine {
            name: series.ticker.to_string(),
            color: series.color,
            values: series.prices.to_vec(),
        })
        .collect::<Vec<_>>();
    let labels = STOCK_DATES.iter().map(|d| short_day(*d)).collect::<Vec<_>>();

    rsx! {
        LineChart { lines, labels, class: "line-chart stock-chart" }
    }
}
