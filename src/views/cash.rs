use crate::finance::{
    CategoryTotals, TRANSACTIONS, TimePeriod, filter_by_period, format_eur, group_by_day, recent,
    total_balance,
};
use crate::views::shared::{ChartLine, LineChart, amount_class, day_heading};
use dioxus::prelude::*;
use time::{Date, OffsetDateTime};

const RECENT_COUNT: usize = 5;

fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

fn category_lines(period: TimePeriod) -> (Vec<ChartLine>, Vec<String>) {
    let filtered = filter_by_period(&TRANSACTIONS, period, today());
    let totals = CategoryTotals::rescan(&filtered);
    let rows = totals.chart_rows();

    let lines = totals
        .categories()
        .enumerate()
        .map(|(i, category)| ChartLine {
            name: category.label().to_string(),
            color: category.color(),
            values: rows.iter().map(|row| row.values[i] as f64 / 100.0).collect(),
        })
        .collect();
    let labels = rows.iter().map(|row| row.month.to_string()).collect();
    (lines, labels)
}

#[component]
pub fn CashView(on_tax_statement: EventHandler<()>) -> Element {
    let mut period = use_signal(TimePeriod::default);
    let mut show_laptop_notice = use_signal(|| true);

    let balance = format_eur(total_balance(&TRANSACTIONS));
    let (lines, labels) = use_memo(move || category_lines(period()))();
    let recent = recent(&TRANSACTIONS, RECENT_COUNT);
    let days = group_by_day(&recent);

    rsx! {
        div { class: "screen cash",
            section { class: "headline",
                p { class: "text-muted", "Balance" }
                h2 { class: "big-number", "{balance}" }
            }

            section { class: "card",
                h3 { "Spending by Category" }
                LineChart { lines, labels }
                div { class: "period-picker",
                    for p in TimePeriod::ALL {
                        button {
                            key: "{p}",
                            class: if period() == p { "period active" } else { "period" },
                            r#type: "button",
                            onclick: move |_| period.set(p),
                            "{p}"
                        }
                    }
                }
            }

            if show_laptop_notice() {
                section { class: "card notice",
                    button {
                        class: "notice-close",
                        r#type: "button",
                        onclick: move |_| show_laptop_notice.set(false),
                        "✕"
                    }
                    div { class: "avatar", "CL" }
                    div { class: "notice-body",
                        h4 { "Professional Expenditure" }
                        p {
                            "Do you want to add your work laptop purchase (1.600,00 €) to professional expenditures? "
                            "An invoice needs to be uploaded to complete the necessary data for filing your tax report at the end of the fiscal year."
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                show_laptop_notice.set(false);
                                on_tax_statement.call(());
                            },
                            "Yes, Add and Upload Invoice"
                        }
                    }
                }
            }

            section { class: "transactions",
                h3 { "Recent Transactions" }
                for (date, txs) in days {
                    div { key: "{date}", class: "day-group",
                        h4 { class: "day-heading", "{day_heading(date)}" }
                        for tx in txs {
                            div { key: "{tx.id}", class: "tx-row",
                                div { class: "tx-text",
                                    span { class: "tx-name", "{tx.name}" }
                                    span { class: "tx-category", "{tx.category}" }
                                }
                                span { class: amount_class(tx.amount_cents), "{format_eur(tx.amount_cents)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
