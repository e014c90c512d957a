//! Translates a parsed [`Report`](crate::report::Report) into the
//! position-free command stream.
//!
//! The builder decides document order and which sections appear; it never
//! measures or positions anything. Sections with no data are omitted
//! entirely, heading included.

use crate::layout::LayoutCommand;
use crate::report::{
    format_brl, parse_amount, suggested_asking_price, Report, Synthesis, Vehicle,
};

/// Builds the full command stream for one report, in document order:
/// title, issue line, vehicle block, technical findings, final
/// classification, component assessments, footer summary.
pub fn build_commands(report: &Report) -> Vec<LayoutCommand> {
    let mut commands = Vec::new();

    if let Some(title) = non_empty(report.title.as_deref()) {
        commands.push(LayoutCommand::Heading {
            text: title.to_string(),
            level: 1,
        });
    }

    let mut issued = Vec::new();
    if let Some(date) = non_empty(report.date.as_deref()) {
        issued.push(format!("Issued {}", date));
    }
    if let Some(protocol) = non_empty(report.protocol.as_deref()) {
        issued.push(format!("Protocol {}", protocol));
    }
    if !issued.is_empty() {
        commands.push(LayoutCommand::Paragraph {
            text: issued.join(" — "),
        });
    }

    push_vehicle(&mut commands, &report.vehicle);
    push_findings(&mut commands, &report.synthesis);

    if let Some(classification) = non_empty(report.synthesis.classification.as_deref()) {
        commands.push(LayoutCommand::ComponentBlock {
            name: "Final classification".to_string(),
            status: classification.to_string(),
            note: None,
        });
    }

    if !report.components.is_empty() {
        commands.push(LayoutCommand::Heading {
            text: "Component assessment".to_string(),
            level: 2,
        });
        for component in &report.components {
            commands.push(LayoutCommand::ComponentBlock {
                name: component.name.clone(),
                status: component.status.clone(),
                note: non_empty(component.note.as_deref()).map(str::to_string),
            });
        }
    }

    if let Some(summary) = non_empty(report.synthesis.summary.as_deref()) {
        commands.push(LayoutCommand::Rule);
        commands.push(LayoutCommand::Paragraph {
            text: summary.to_string(),
        });
    }

    log::debug!("built {} layout commands", commands.len());
    commands
}

fn push_vehicle(commands: &mut Vec<LayoutCommand>, vehicle: &Vehicle) {
    let mut rows: Vec<(&str, String)> = Vec::new();
    for (label, value) in [
        ("Brand", &vehicle.brand),
        ("Model", &vehicle.model),
        ("Year", &vehicle.year),
        ("Plate", &vehicle.plate),
        ("Fuel", &vehicle.fuel),
        ("Market value", &vehicle.market_value),
    ] {
        if let Some(value) = non_empty(value.as_deref()) {
            rows.push((label, value.to_string()));
        }
    }
    if let Some(value) = non_empty(vehicle.market_value.as_deref()) {
        if let Some(amount) = parse_amount(value) {
            rows.push((
                "Suggested asking price",
                format_brl(suggested_asking_price(amount)),
            ));
        }
    }
    if rows.is_empty() {
        return;
    }

    commands.push(LayoutCommand::Heading {
        text: "Vehicle".to_string(),
        level: 2,
    });
    for (label, value) in rows {
        commands.push(LayoutCommand::KeyValue {
            label: label.to_string(),
            value,
        });
    }
    commands.push(LayoutCommand::Rule);
}

fn push_findings(commands: &mut Vec<LayoutCommand>, synthesis: &Synthesis) {
    let rows: Vec<(&str, String)> = [
        ("Repainted panels", join_list(&synthesis.repaint_locations)),
        ("Filler putty", join_list(&synthesis.filler_putty_locations)),
        ("Alignment issues", join_list(&synthesis.alignment_issues)),
        (
            "Glass / headlights replaced",
            join_list(&synthesis.glass_replacements),
        ),
        ("Lower structure", lower_structure(synthesis)),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .collect();
    if rows.is_empty() {
        return;
    }

    commands.push(LayoutCommand::Heading {
        text: "Technical findings".to_string(),
        level: 2,
    });
    for (label, value) in rows {
        commands.push(LayoutCommand::KeyValue {
            label: label.to_string(),
            value,
        });
    }
    commands.push(LayoutCommand::Rule);
}

/// Joins list findings as "a, b, c", skipping blank entries.
fn join_list(items: &[String]) -> Option<String> {
    let kept: Vec<&str> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(", "))
    }
}

/// The inspector's note wins over the boolean verdict when both are present.
fn lower_structure(synthesis: &Synthesis) -> Option<String> {
    if let Some(note) = non_empty(synthesis.lower_structure_note.as_deref()) {
        return Some(note.to_string());
    }
    match synthesis.lower_structure_ok {
        Some(true) => Some("No structural damage found".to_string()),
        Some(false) => Some("Signs of structural intervention".to_string()),
        None => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
