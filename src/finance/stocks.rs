use time::macros::date;
use time::Date;

/// One line of the stock comparison chart. Prices in euros.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StockSeries {
    pub ticker: &'static str,
    pub company: &'static str,
    pub color: &'static str,
    pub prices: &'static [f64; 10],
}

pub const STOCK_DATES: [Date; 10] = [
    date!(2024 - 05 - 01),
    date!(2024 - 05 - 02),
    date!(2024 - 05 - 03),
    date!(2024 - 05 - 04),
    date!(2024 - 05 - 05),
    date!(2024 - 05 - 06),
    date!(2024 - 05 - 07),
    date!(2024 - 05 - 08),
    date!(2024 - 05 - 09),
    date!(2024 - 05 - 10),
];

pub const STOCK_SERIES: [StockSeries; 3] = [
    StockSeries {
        ticker: "AAPL",
        company: "Apple",
        color: "#4ade80",
        prices: &[
            145.32, 147.54, 146.89, 148.76, 151.23, 153.45, 152.78, 155.41, 159.67, 164.32,
        ],
    },
    StockSeries {
        ticker: "AMZ",
        company: "Amazon",
        color: "#33C3F0",
        prices: &[
            162.45, 157.67, 163.21, 159.32, 166.78, 158.21, 167.65, 159.34, 169.89, 165.45,
        ],
    },
    StockSeries {
        ticker: "BCO",
        company: "Boeing",
        color: "#ea384c",
        prices: &[
            168.23, 172.12, 167.45, 171.67, 169.32, 172.54, 168.23, 173.76, 166.32, 170.21,
        ],
    },
];

impl StockSeries {
    pub fn latest(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }

    /// Percent change from the first to the last price.
    pub fn change_percent(&self) -> f64 {
        let first = self.prices[0];
        (self.latest() - first) / first * 100.0
    }
}

/// Price range over every series, for a shared y axis.
pub fn price_bounds() -> (f64, f64) {
    STOCK_SERIES
        .iter()
        .flat_map(|s| s.prices.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_cover_every_date() {
        for series in STOCK_SERIES {
            assert_eq!(series.prices.len(), STOCK_DATES.len());
        }
    }

    #[test]
    fn apple_rose_over_the_window() {
        let apple = &STOCK_SERIES[0];
        assert_eq!(apple.latest(), 164.32);
        assert!((apple.change_percent() - 13.0746).abs() < 1e-3);
    }

    #[test]
    fn bounds_span_all_series() {
        assert_eq!(price_bounds(), (145.32, 173.76));
    }
}
