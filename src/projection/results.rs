//! Output structures for a simulation run

use serde::{Deserialize, Serialize};

/// What happened in one simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResult {
    /// Month number (1-indexed)
    pub month: u32,

    // Holding
    pub revenue_holding: f64,
    pub charges_holding: f64,
    pub result_holding: f64,

    // Subsidiary
    pub revenue_subsidiary: f64,
    pub charges_subsidiary: f64,
    pub result_subsidiary: f64,

    // Profit, tax and distributions
    pub profit_holding: f64,
    pub is_amount: f64,
    pub profit_net: f64,
    pub dividend_on_profit: f64,
    pub shareholders_dividends: f64,
    pub holding_to_subsidiary: f64,

    // Balances after every flow of the month
    pub subsidiary_capital: f64,
    pub holding_capital: f64,
}

/// Complete simulation output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One row per month, in order
    pub months: Vec<MonthlyResult>,
}

impl SimulationResult {
    pub fn new() -> Self {
        Self { months: Vec::new() }
    }

    pub fn with_capacity(months: usize) -> Self {
        Self {
            months: Vec::with_capacity(months),
        }
    }

    pub fn add_month(&mut self, row: MonthlyResult) {
        self.months.push(row);
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn last(&self) -> Option<&MonthlyResult> {
        self.months.last()
    }

    pub fn into_months(self) -> Vec<MonthlyResult> {
        self.months
    }

    /// Totals over the run and closing balances
    ///
    /// Closing balances of an empty run are 0.
    pub fn summary(&self) -> SimulationSummary {
        let rows = &self.months;
        SimulationSummary {
            total_months: rows.len() as u32,
            total_revenue_holding: rows.iter().map(|r| r.revenue_holding).sum(),
            total_charges_holding: rows.iter().map(|r| r.charges_holding).sum(),
            total_revenue_subsidiary: rows.iter().map(|r| r.revenue_subsidiary).sum(),
            total_charges_subsidiary: rows.iter().map(|r| r.charges_subsidiary).sum(),
            total_tax: rows.iter().map(|r| r.is_amount).sum(),
            total_dividend_on_profit: rows.iter().map(|r| r.dividend_on_profit).sum(),
            total_shareholders_dividends: rows.iter().map(|r| r.shareholders_dividends).sum(),
            total_transfers: rows.iter().map(|r| r.holding_to_subsidiary).sum(),
            final_holding_capital: rows.last().map(|r| r.holding_capital).unwrap_or(0.0),
            final_subsidiary_capital: rows.last().map(|r| r.subsidiary_capital).unwrap_or(0.0),
        }
    }

    /// Series for charting, grouped the way they are usually plotted
    pub fn series(&self) -> ChartSeries {
        let labels = self.months.iter().map(|r| r.month).collect();
        let column = |f: fn(&MonthlyResult) -> f64| self.months.iter().map(f).collect::<Vec<_>>();

        ChartSeries {
            months: labels,
            profits: vec![
                Series::new("Profit Brut Holding", column(|r| r.profit_holding)),
                Series::new("Profit Net Holding", column(|r| r.profit_net)),
            ],
            dividends: vec![
                Series::new("Dividendes Actionnaires", column(|r| r.shareholders_dividends)),
                Series::new("Reversement → Filiale", column(|r| r.holding_to_subsidiary)),
            ],
            capitals: vec![
                Series::new("Capital Filiale", column(|r| r.subsidiary_capital)),
                Series::new("Capital Holding", column(|r| r.holding_capital)),
            ],
        }
    }
}

/// Summary statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_months: u32,
    pub total_revenue_holding: f64,
    pub total_charges_holding: f64,
    pub total_revenue_subsidiary: f64,
    pub total_charges_subsidiary: f64,
    pub total_tax: f64,
    pub total_dividend_on_profit: f64,
    pub total_shareholders_dividends: f64,
    pub total_transfers: f64,
    pub final_holding_capital: f64,
    pub final_subsidiary_capital: f64,
}

/// A labelled series of monthly values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
}

impl Series {
    fn new(label: &str, data: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            data,
        }
    }
}

/// Chart-ready series of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub months: Vec<u32>,
    pub profits: Vec<Series>,
    pub dividends: Vec<Series>,
    pub capitals: Vec<Series>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: u32, tax: f64, holding_capital: f64) -> MonthlyResult {
        MonthlyResult {
            month,
            revenue_holding: 10_000.0,
            charges_holding: 5000.0,
            result_holding: 5000.0,
            revenue_subsidiary: 2000.0,
            charges_subsidiary: 1000.0,
            result_subsidiary: 1000.0,
            profit_holding: 5000.0,
            is_amount: tax,
            profit_net: 5000.0 - tax,
            dividend_on_profit: 0.0,
            shareholders_dividends: 0.0,
            holding_to_subsidiary: 100.0,
            subsidiary_capital: 1100.0 * month as f64,
            holding_capital,
        }
    }

    #[test]
    fn test_summary_totals() {
        let mut result = SimulationResult::new();
        result.add_month(row(1, 750.0, 4150.0));
        result.add_month(row(2, 750.0, 8300.0));

        let summary = result.summary();
        assert_eq!(summary.total_months, 2);
        assert_eq!(summary.total_revenue_holding, 20_000.0);
        assert_eq!(summary.total_tax, 1500.0);
        assert_eq!(summary.total_transfers, 200.0);
        assert_eq!(summary.final_holding_capital, 8300.0);
        assert_eq!(summary.final_subsidiary_capital, 2200.0);
    }

    #[test]
    fn test_summary_of_empty_run() {
        let summary = SimulationResult::new().summary();
        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.final_holding_capital, 0.0);
    }

    #[test]
    fn test_series_follow_months() {
        let mut result = SimulationResult::new();
        result.add_month(row(1, 750.0, 4150.0));
        result.add_month(row(2, 700.0, 8350.0));

        let series = result.series();
        assert_eq!(series.months, vec![1, 2]);
        assert_eq!(series.profits[1].label, "Profit Net Holding");
        assert_eq!(series.profits[1].data, vec![4250.0, 4300.0]);
        assert_eq!(series.capitals[1].data, vec![4150.0, 8350.0]);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&row(1, 750.0, 4150.0)).unwrap();
        assert!(json.contains("\"isAmount\":750.0"));
        assert!(json.contains("\"holdingToSubsidiary\""));
    }
}
