//! Show command - list controls and their values.

use colored::Colorize;
use serde_json::json;
use tokenflags_core::{Control, Panel};

use super::{GlobalOptions, Session};
use crate::error::CliResult;

pub fn run(options: &GlobalOptions, token: Option<&str>, as_json: bool) -> CliResult<()> {
    let mut session = Session::open(options)?;
    session.load_token(token);
    let token = session.panel.encode();

    if as_json {
        println!("{}", to_json(&session.panel, token.as_str()));
        return Ok(());
    }

    println!();
    println!("  {} {}", "Flags:".bright_white().bold(), token.as_str().cyan());
    println!();

    let unsectioned: Vec<&Control> = session
        .panel
        .controls()
        .filter(|c| c.section().is_none())
        .collect();
    if !unsectioned.is_empty() {
        print_controls(&unsectioned);
    }

    for section in session.panel.sections() {
        println!("  {}", section.bright_cyan().bold());
        let controls: Vec<&Control> = session.panel.section(section).collect();
        print_controls(&controls);
    }

    Ok(())
}

fn print_controls(controls: &[&Control]) {
    let width = controls.iter().map(|c| c.label().len()).max().unwrap_or(0);

    for control in controls {
        let address = control.address();
        println!(
            "    {:<width$}  {} {}",
            control.label(),
            render_value(control),
            format!(
                "{} [byte {}, shift {}, {} bit{}]",
                control.key(),
                address.byte,
                address.shift,
                control.width(),
                if control.width() == 1 { "" } else { "s" }
            )
            .dimmed(),
            width = width
        );
    }
    println!();
}

fn render_value(control: &Control) -> String {
    let value = control.display();
    let padded = format!("{:<14}", value);
    match value.as_str() {
        "on" => padded.green().to_string(),
        "off" => padded.dimmed().to_string(),
        "indeterminate" => padded.yellow().to_string(),
        _ => padded.cyan().to_string(),
    }
}

fn to_json(panel: &Panel, token: &str) -> serde_json::Value {
    let controls: Vec<serde_json::Value> = panel
        .controls()
        .map(|c| {
            json!({
                "key": c.key(),
                "label": c.label(),
                "section": c.section(),
                "kind": c.kind_name(),
                "value": c.display(),
                "raw": c.value(),
                "byte": c.address().byte,
                "shift": c.address().shift,
                "width": c.width(),
            })
        })
        .collect();

    json!({ "token": token, "controls": controls })
}
