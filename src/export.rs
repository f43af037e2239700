//! CSV export of monthly results

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, SimulationError};
use crate::projection::MonthlyResult;

/// Default file name prefix for exports
pub const DEFAULT_EXPORT_PREFIX: &str = "simulation_holdify";

/// Column headers, in output order
pub const CSV_HEADERS: [&str; 15] = [
    "Mois",
    "Recettes Holding",
    "Charges Holding",
    "Résultat Holding",
    "Recettes Filiale",
    "Charges Filiale",
    "Résultat Filiale",
    "Bénéfice Holding",
    "IS Payé",
    "Profit Net Holding",
    "Dividende sur Bénéfice",
    "Dividendes Actionnaires",
    "Reversement Holding→Filiale",
    "Capital Filiale",
    "Capital Holding",
];

fn record(r: &MonthlyResult) -> [String; 15] {
    [
        r.month.to_string(),
        format!("{:.2}", r.revenue_holding),
        format!("{:.2}", r.charges_holding),
        format!("{:.2}", r.result_holding),
        format!("{:.2}", r.revenue_subsidiary),
        format!("{:.2}", r.charges_subsidiary),
        format!("{:.2}", r.result_subsidiary),
        format!("{:.2}", r.profit_holding),
        format!("{:.2}", r.is_amount),
        format!("{:.2}", r.profit_net),
        format!("{:.2}", r.dividend_on_profit),
        format!("{:.2}", r.shareholders_dividends),
        format!("{:.2}", r.holding_to_subsidiary),
        format!("{:.2}", r.subsidiary_capital),
        format!("{:.2}", r.holding_capital),
    ]
}

/// Write results as CSV, amounts with two decimals
pub fn write_csv<W: Write>(results: &[MonthlyResult], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for row in results {
        csv_writer.write_record(record(row))?;
    }
    csv_writer
        .flush()
        .map_err(|e| SimulationError::Export(e.to_string()))?;
    Ok(())
}

/// Results as a CSV document
pub fn to_csv_string(results: &[MonthlyResult]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(results, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| SimulationError::Export(e.to_string()))
}

/// Write results to a CSV file
pub fn write_csv_file<P: AsRef<Path>>(results: &[MonthlyResult], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        SimulationError::Export(format!("cannot create {}: {}", path.display(), e))
    })?;
    write_csv(results, file)
}

/// `<prefix>_<YYYY-MM-DD>.csv`
pub fn default_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MonthlyResult {
        MonthlyResult {
            month: 1,
            revenue_holding: 10_000.0,
            charges_holding: 5000.0,
            result_holding: 5000.0,
            revenue_subsidiary: 5000.0,
            charges_subsidiary: 3000.0,
            result_subsidiary: 2000.0,
            profit_holding: 5000.0,
            is_amount: 750.0,
            profit_net: 4250.0,
            dividend_on_profit: 212.5,
            shareholders_dividends: 0.0,
            holding_to_subsidiary: 0.0,
            subsidiary_capital: 2000.0,
            holding_capital: 4037.5,
        }
    }

    #[test]
    fn test_csv_header_and_row() {
        let csv = to_csv_string(&[sample()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Mois,Recettes Holding,Charges Holding"));
        assert!(lines[0].ends_with("Capital Filiale,Capital Holding"));
        assert_eq!(
            lines[1],
            "1,10000.00,5000.00,5000.00,5000.00,3000.00,2000.00,5000.00,750.00,4250.00,212.50,0.00,0.00,2000.00,4037.50"
        );
    }

    #[test]
    fn test_empty_results_still_have_header() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            default_file_name(DEFAULT_EXPORT_PREFIX, date),
            "simulation_holdify_2024-03-09.csv"
        );
    }
}
