//! Plain-text rendering of reports

use crate::report::{ChildList, CircuitList, ClassStandings, ParentView, StudentReport};
use crate::utils::{fit_cell, short_month_label};

const NAME_WIDTH: usize = 20;

pub fn render_circuit_list(list: &CircuitList) -> String {
    let mut out = String::new();

    out.push_str("Abacus Circuit rounds\n");
    out.push_str("=====================\n");

    if list.circuits.is_empty() {
        out.push_str("No rounds recorded yet.\n");
        return out;
    }

    for circuit in &list.circuits {
        out.push_str(&format!(
            "Round {:>4}  {}\n",
            circuit.circuit_round, circuit.month_label
        ));
    }
    out
}

pub fn render_class_standings(standings: &ClassStandings) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Abacus Circuit round {} ({})\n",
        standings.circuit_round, standings.month_label
    ));
    out.push_str(&format!("{} class standings\n\n", standings.class_level));

    if standings.rows.is_empty() {
        out.push_str("No results for this class.\n");
        return out;
    }

    out.push_str(&format!(
        "{:>6}  {}  {:>5}  {:>5}  {:>6}  {:>5}\n",
        "Rank",
        fit_cell("Name", NAME_WIDTH),
        "Mult",
        "Div",
        "Mental",
        "Total"
    ));

    for row in &standings.rows {
        let rank = match row.medal {
            Some(medal) => format!("{} {}", medal, row.rank),
            None => row.rank.to_string(),
        };
        let name = if row.name.is_empty() {
            row.competitor_id.as_str()
        } else {
            row.name.as_str()
        };

        out.push_str(&format!(
            "{:>6}  {}  {:>5}  {:>5}  {:>6}  {:>5}\n",
            rank,
            fit_cell(name, NAME_WIDTH),
            row.subscores.multiplication,
            row.subscores.division,
            row.subscores.mental_calculation,
            row.total_score
        ));
    }
    out
}

pub fn render_student_report(report: &StudentReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Results for {}\n", report.student.display_name()));
    out.push_str(&format!(
        "Abacus Circuit round {} ({})\n\n",
        report.circuit_round, report.month_label
    ));

    match &report.current {
        Some(current) => {
            let scores = &current.record.subscores;
            out.push_str(&format!("Class: {}\n", current.record.class_level));
            out.push_str(&format!(
                "Multiplication: {}  Division: {}  Mental: {}  Total: {}\n",
                scores.multiplication,
                scores.division,
                scores.mental_calculation,
                current
                    .record
                    .total_score
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ));
            out.push_str(&format!("Rank: {}\n", current.rank));
        }
        None => {
            out.push_str("No result recorded for this round.\n");
        }
    }

    if !report.history.is_empty() {
        out.push_str("\nHistory\n-------\n");
    }

    for group in &report.history {
        out.push_str(&format!("{} class\n", group.class_level));
        for entry in &group.entries {
            let marker = if entry.record.circuit_round == report.circuit_round {
                "*"
            } else {
                " "
            };
            let month = entry
                .event_date
                .map(short_month_label)
                .unwrap_or_default();
            let total = entry
                .record
                .total_score
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());

            out.push_str(&format!(
                "{} {:>4}  {:<7}  {:>5}  {:>5}  {:>6}  {:>5}\n",
                marker,
                entry.record.circuit_round,
                month,
                entry.record.subscores.multiplication,
                entry.record.subscores.division,
                entry.record.subscores.mental_calculation,
                total
            ));
        }
    }

    out
}

pub fn render_child_list(list: &ChildList) -> String {
    let mut out = String::new();

    out.push_str("Choose a child\n");
    out.push_str("==============\n");

    if list.children.is_empty() {
        out.push_str("No children linked to this account.\n");
        return out;
    }

    for child in &list.children {
        out.push_str(&format!(
            "{}  {}\n",
            fit_cell(&child.competitor_id, 12),
            child.display_name()
        ));
    }
    out
}

pub fn render_parent_view(view: &ParentView) -> String {
    match view {
        ParentView::Children(list) => render_child_list(list),
        ParentView::Report(report) => render_student_report(report),
    }
}
