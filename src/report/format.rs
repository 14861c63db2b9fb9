//! Plain-text tables for terminal output.
//!
//! All numbers are annualized growth in percent per year.

use crate::domain::DecompositionSeries;
use crate::report::PeriodSummary;

/// One line per subperiod: labor productivity and its TFP decomposition.
pub fn format_summary(summaries: &[PeriodSummary]) -> String {
    let mut out = String::new();

    out.push_str("Labor productivity growth (% per year):\n");
    out.push_str(
        format!(
            "{:<11} {:>5} {:>9} {:>9} {:>9} {:>9}\n",
            "period", "base", "dln(Y/L)", "TFP", "K/Y", "dlnA"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&rule(&[11, 5, 9, 9, 9, 9]));
    for s in summaries {
        out.push_str(
            format!(
                "{:<11} {:>5} {:>9.3} {:>9.3} {:>9.3} {:>9.3}\n",
                s.subperiod.label(),
                s.subperiod.base_year,
                s.dln_y_per_l,
                s.tfp_contrib,
                s.ky_contrib,
                s.dln_a
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push_str("\nTFP decomposition (% per year):\n");
    out.push_str(
        format!(
            "{:<11} {:>9} {:>9} {:>9} {:>9}\n",
            "period", "within", "baumol", "K realloc", "L realloc"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&rule(&[11, 9, 9, 9, 9]));
    for s in summaries {
        out.push_str(
            format!(
                "{:<11} {:>9.3} {:>9.3} {:>9.3} {:>9.3}\n",
                s.subperiod.label(),
                s.within,
                s.baumol,
                s.capital_reallocation,
                s.labor_reallocation
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Year-by-year rows of one decomposition, in log points.
pub fn format_series(series: &DecompositionSeries) -> String {
    let mut out = format!("{} ({:?}):\n", series.subperiod.label(), series.mode);
    out.push_str(
        format!(
            "{:<6} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            "year", "within", "baumol", "K realloc", "L realloc", "total"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&rule(&[6, 10, 10, 10, 10, 10]));
    for r in &series.rows {
        out.push_str(&format!(
            "{:<6} {:>10.5} {:>10.5} {:>10.5} {:>10.5} {:>10.5}\n",
            r.year, r.within, r.baumol, r.capital_reallocation, r.labor_reallocation, r.total
        ));
    }
    out
}

fn rule(widths: &[usize]) -> String {
    let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("{}\n", parts.join(" "))
}
