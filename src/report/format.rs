//! Terminal output formatting for a comparison run.

use crate::domain::{ComparisonRun, CompareConfig};

/// Format the full run summary (inputs, settings, verdict, deviations).
pub fn format_run_summary(run: &ComparisonRun, config: &CompareConfig) -> String {
    let mut out = String::new();

    out.push_str("=== funnel - curve comparison ===\n");

    let (rx0, rx1) = run.reference.x_span();
    out.push_str(&format!(
        "Reference: n={} | x=[{rx0}, {rx1}]\n",
        run.reference.len()
    ));
    let (tx0, tx1) = run.test.x_span();
    out.push_str(&format!("Test     : n={} | x=[{tx0}, {tx1}]\n", run.test.len()));

    let set: Vec<String> = config
        .tolerances
        .entries()
        .iter()
        .filter(|(_, v)| *v > 0.0)
        .map(|(name, v)| format!("{name}={v}"))
        .collect();
    if set.is_empty() {
        out.push_str("Tolerances: none (zero-width funnel)\n");
    } else {
        out.push_str(&format!("Tolerances: {}\n", set.join(" ")));
    }
    out.push_str(&format!(
        "Envelope : lower n={} | upper n={}\n",
        run.envelope.lower.len(),
        run.envelope.upper.len()
    ));

    out.push('\n');
    if run.is_valid() {
        out.push_str("Result: Valid - test curve is inside the envelope.\n");
    } else {
        let deviations = &run.deviations;
        out.push_str(&format!(
            "Result: Invalid - {} of {} test points outside the envelope.\n",
            deviations.violations.len(),
            run.test.len()
        ));
        out.push_str(&format!("Max error: {}\n", deviations.max_error()));
        // The first few offending samples are usually enough to locate the
        // problem; the full list is in errors.csv.
        for v in deviations.violations.iter().take(5) {
            out.push_str(&format!("  x={} error={}\n", v.x, v.error));
        }
        if deviations.violations.len() > 5 {
            out.push_str(&format!(
                "  ... {} more (see errors.csv)\n",
                deviations.violations.len() - 5
            ));
        }
    }

    out
}
