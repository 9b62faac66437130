//! Monthly resampling.
//!
//! Daily prices are collapsed to one row per calendar month holding the last
//! price observed in that month, labelled with the month's last calendar
//! day. Months without any observation for a ticker stay missing; nothing is
//! carried forward.

use chrono::Datelike;
use rotation_traits::{Date, MonthlyPriceTable, PriceTable, Result, ReturnTable};
use tracing::debug;

/// Last calendar day of the month containing `date`.
pub fn month_end(date: Date) -> Date {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    Date::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Resample daily prices to month-end prices.
///
/// Produces one row for every calendar month from the first to the last
/// observed month, including months with no observations at all (those rows
/// are entirely missing).
///
/// # Errors
///
/// Returns an error if the resulting table is malformed, which cannot happen
/// for a valid input table.
pub fn to_monthly(prices: &PriceTable) -> Result<MonthlyPriceTable> {
    let tickers = prices.tickers().to_vec();
    let (Some(&first), Some(&last)) = (prices.dates().first(), prices.dates().last()) else {
        return Ok(MonthlyPriceTable::empty(tickers));
    };

    let mut months = Vec::new();
    let mut month = month_end(first);
    let last_month = month_end(last);
    while month <= last_month {
        months.push(month);
        match month.succ_opt() {
            Some(next) => month = month_end(next),
            None => break,
        }
    }

    let width = tickers.len();
    let mut values = vec![vec![f64::NAN; width]; months.len()];
    let mut slot = 0;
    for (date, row) in prices.rows() {
        let label = month_end(date);
        while months[slot] < label {
            slot += 1;
        }
        for (cell, &price) in values[slot].iter_mut().zip(row) {
            // Rows are date-ascending, so the last finite value wins.
            if price.is_finite() {
                *cell = price;
            }
        }
    }

    debug!(days = prices.height(), months = months.len(), "resampled to monthly");
    MonthlyPriceTable::new(months, tickers, values)
}

/// Month-over-month simple returns.
///
/// The first month has no prior reference and is dropped, so the result has
/// exactly one row fewer than `monthly` (or no rows if `monthly` is empty).
pub fn monthly_returns(monthly: &MonthlyPriceTable) -> ReturnTable {
    monthly.pct_change(1).skip_rows(1)
}
