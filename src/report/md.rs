use crate::types::coverage::CoverageReport;

pub fn to_markdown(report: &CoverageReport) -> String {
    let mut output = String::new();
    output.push_str("# Coverage Report\n\n");
    output.push_str(&format!(
        "Checklist: {} | policy: {} | method: {}\n",
        report.checklist,
        report.policy,
        report.method.as_str()
    ));
    output.push_str(&format!(
        "Completed: {}/{}\n\n",
        report.completed_count, report.total_count
    ));

    output.push_str("## Items\n\n");
    if report.items.is_empty() {
        output.push_str("- none\n");
    } else {
        for item in &report.items {
            let mark = if item.complete { "x" } else { " " };
            output.push_str(&format!(
                "- [{}] {} ({}): {:.2}/{:.0} pts",
                mark, item.text, item.id, item.points, item.threshold
            ));
            if !item.matched_keywords.is_empty() {
                output.push_str(&format!(" [{}]", item.matched_keywords.join(", ")));
            }
            output.push('\n');
        }
    }

    output
}
