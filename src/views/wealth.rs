use crate::finance::{PORTFOLIO_VALUE_CENTS, STOCK_SERIES, format_eur};
use crate::views::shared::StockChart;
use dioxus::prelude::*;

#[component]
pub fn WealthView() -> Element {
    let portfolio = format_eur(PORTFOLIO_VALUE_CENTS);

    rsx! {
        div { class: "screen wealth",
            section { class: "headline",
                p { class: "text-muted", "Portfolio" }
                h2 { class: "big-number", "{portfolio}" }
            }
            section { class: "card",
                h3 { "Stock Comparison" }
                StockChart {}
            }
            section { class: "holdings",
                for series in STOCK_SERIES.iter() {
                    div { key: "{series.ticker}", class: "holding-row",
                        span { class: "legend-dot", style: "background: {series.color}" }
                        div { class: "holding-text",
                            span { class: "holding-ticker", "{series.ticker}" }
                            span { class: "text-muted", "{series.company}" }
                        }
                        div { class: "holding-figures",
                            span { "{series.latest():.2}" }
                            span {
                                class: if series.change_percent() < 0.0 { "amount negative" } else { "amount positive" },
                                "{series.change_percent():+.2}%"
                            }
                        }
                    }
                }
            }
        }
    }
}
