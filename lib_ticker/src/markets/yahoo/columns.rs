//! # Yahoo Quote Columns
//!
//! Named quote columns and the two-character format codes the CSV endpoint
//! expects in its `f` parameter.

/// `(name, code)` for every supported column.
pub const COLUMNS: &[(&str, &str)] = &[
    ("AfterHoursChangeRealtime", "c8"),
    ("AnnualizedGain", "g3"),
    ("Ask", "a0"),
    ("AskRealtime", "b2"),
    ("AskSize", "a5"),
    ("AverageDailyVolume", "a2"),
    ("Bid", "b0"),
    ("BidRealtime", "b3"),
    ("BidSize", "b6"),
    ("BookValuePerShare", "b4"),
    ("Change", "c1"),
    ("ChangeFromFiftydayMovingAverage", "m7"),
    ("ChangeFromTwoHundreddayMovingAverage", "m5"),
    ("ChangeFromYearHigh", "k4"),
    ("ChangeFromYearLow", "j5"),
    ("ChangeInPercent", "p2"),
    ("ChangeInPercentFromYearHigh", "k5"),
    ("ChangeInPercentRealtime", "k2"),
    ("ChangeRealtime", "c6"),
    ("Change_ChangeInPercent", "c0"),
    ("Commission", "c3"),
    ("Currency", "c4"),
    ("DaysHigh", "h0"),
    ("DaysLow", "g0"),
    ("DaysRange", "m0"),
    ("DaysRangeRealtime", "m2"),
    ("DaysValueChange", "w1"),
    ("DaysValueChangeRealtime", "w4"),
    ("DilutedEPS", "e0"),
    ("DividendPayDate", "r1"),
    ("EBITDA", "j4"),
    ("EPSEstimateCurrentYear", "e7"),
    ("EPSEstimateNextQuarter", "e9"),
    ("EPSEstimateNextYear", "e8"),
    ("ExDividendDate", "q0"),
    ("FiftydayMovingAverage", "m3"),
    ("HighLimit", "l2"),
    ("HoldingsGain", "g4"),
    ("HoldingsGainPercent", "g1"),
    ("HoldingsGainPercentRealtime", "g5"),
    ("HoldingsGainRealtime", "g6"),
    ("HoldingsValue", "v1"),
    ("HoldingsValueRealtime", "v7"),
    ("LastTradeDate", "d1"),
    ("LastTradePriceOnly", "l1"),
    ("LastTradeRealtimeWithTime", "k1"),
    ("LastTradeSize", "k3"),
    ("LastTradeTime", "t1"),
    ("LastTradeWithTime", "l0"),
    ("LowLimit", "l3"),
    ("MarketCapRealtime", "j3"),
    ("MarketCapitalization", "j1"),
    ("MoreInfo", "i0"),
    ("Name", "n0"),
    ("Notes", "n4"),
    ("OneyrTargetPrice", "t8"),
    ("Open", "o0"),
    ("OrderBookRealtime", "i5"),
    ("PEGRatio", "r5"),
    ("PERatio", "r0"),
    ("PERatioRealtime", "r2"),
    ("PercentChangeFromFiftydayMovingAverage", "m8"),
    ("PercentChangeFromTwoHundreddayMovingAverage", "m6"),
    ("PercentChangeFromYearLow", "j6"),
    ("PreviousClose", "p0"),
    ("PriceBook", "p6"),
    ("PriceEPSEstimateCurrentYear", "r6"),
    ("PriceEPSEstimateNextYear", "r7"),
    ("PricePaid", "p1"),
    ("PriceSales", "p5"),
    ("Revenue", "s6"),
    ("SharesFloat", "f6"),
    ("SharesOutstanding", "j2"),
    ("SharesOwned", "s1"),
    ("ShortRatio", "s7"),
    ("StockExchange", "x0"),
    ("Symbol", "s0"),
    ("TickerTrend", "t7"),
    ("TradeDate", "d2"),
    ("TradeLinks", "t6"),
    ("TradeLinksAdditional", "f0"),
    ("TrailingAnnualDividendYield", "d0"),
    ("TrailingAnnualDividendYieldInPercent", "y0"),
    ("TwoHundreddayMovingAverage", "m4"),
    ("Volume", "v0"),
    ("YearHigh", "k0"),
    ("YearLow", "j0"),
    ("YearRange", "w0"),
];

/// Columns whose numbers the server formats with unquoted commas. They are
/// requested last so the surplus fields can be glued back together.
pub const PROBLEM_COLUMNS: &[&str] = &["SharesFloat", "SharesOutstanding"];

/// Format code for a column name.
pub fn code_for(name: &str) -> Option<&'static str> {
    COLUMNS.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

/// Canonical (static) spelling of a column name.
pub fn lookup(name: &str) -> Option<&'static str> {
    COLUMNS.iter().find(|(n, _)| *n == name).map(|(n, _)| *n)
}

pub fn is_problem(name: &str) -> bool {
    PROBLEM_COLUMNS.contains(&name)
}

/// Every column name, in catalogue order.
pub fn all_names() -> Vec<&'static str> {
    COLUMNS.iter().map(|(n, _)| *n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_is_complete_and_unique() {
        assert_eq!(COLUMNS.len(), 88);
        let names: HashSet<_> = COLUMNS.iter().map(|(n, _)| n).collect();
        let codes: HashSet<_> = COLUMNS.iter().map(|(_, c)| c).collect();
        assert_eq!(names.len(), COLUMNS.len());
        assert_eq!(codes.len(), COLUMNS.len());
        assert!(COLUMNS.iter().all(|(_, c)| c.len() == 2));
    }

    #[test]
    fn test_code_lookup() {
        assert_eq!(code_for("Symbol"), Some("s0"));
        assert_eq!(code_for("LastTradePriceOnly"), Some("l1"));
        assert_eq!(code_for("Nope"), None);
    }

    #[test]
    fn test_problem_columns_are_known() {
        for name in PROBLEM_COLUMNS {
            assert!(code_for(name).is_some());
            assert!(is_problem(name));
        }
        assert!(!is_problem("Volume"));
    }
}
