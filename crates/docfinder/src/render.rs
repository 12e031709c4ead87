use crate::prelude::*;
use colored::Colorize;
use docfinder_core::doctor::Doctor;
use docfinder_core::view::{DirectoryView, NO_RESULTS_HINT, NO_RESULTS_MESSAGE};

/// Convert a directory view to JSON string
pub fn format_view_json(view: &DirectoryView<'_>) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_card(index: usize, doctor: &Doctor) -> String {
    let mut card = String::new();

    let avatar = match &doctor.photo {
        Some(_) => String::new(),
        None => format!(" ({})", doctor.initials()),
    };

    card.push_str(&format!(
        "\n{} {}{}\n",
        format!("[{}]", index + 1).yellow().bold(),
        doctor.name.white().bold(),
        avatar.bright_black()
    ));

    if let Some(specialty) = doctor.primary_specialty() {
        card.push_str(&format!("    {}\n", specialty.bright_white()));
    }

    if !doctor.qualifications.is_empty() {
        card.push_str(&format!("    {}\n", doctor.qualifications.bright_black()));
    }

    card.push_str(&format!(
        "    {}: {} | {}: {}\n",
        "Experience".green(),
        doctor.experience_text.bright_white(),
        "Fee".green(),
        doctor.fees_text.bright_yellow()
    ));

    if !doctor.clinic.is_empty() || !doctor.location.is_empty() {
        card.push_str(&format!(
            "    {}: {} | {}: {}\n",
            "Clinic".green(),
            doctor.clinic.bright_white(),
            "Location".green(),
            doctor.location.bright_white()
        ));
    }

    let modes: Vec<&str> = doctor
        .consultation_modes
        .iter()
        .map(|mode| mode.label())
        .collect();
    card.push_str(&format!(
        "    {}: {}\n",
        "Consultation".green(),
        modes.join(", ").bright_magenta()
    ));

    card
}

/// Convert a directory view to formatted text with colors
pub fn format_view_text(view: &DirectoryView<'_>) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("DOCTORS ({} of {})", view.count, view.total)
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if view.is_empty() {
        result.push_str(&format!("\n{}\n", NO_RESULTS_MESSAGE.yellow()));
        result.push_str(&format!("{}\n", NO_RESULTS_HINT.bright_black()));
    } else {
        for (index, doctor) in view.doctors.iter().enumerate() {
            result.push_str(&format_card(index, doctor));
        }
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "SHARE".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    if view.query.is_empty() {
        result.push_str(&format!("\n{}\n", "No filters applied".bright_white()));
    } else {
        result.push_str(&format!(
            "\n{}: {}\n",
            "Query".green(),
            format!("?{}", view.query).cyan()
        ));
        result.push_str(&format!(
            "{}: {}\n",
            "Repeat".green(),
            format!("docfinder search --query '{}'", view.query).cyan()
        ));
    }

    result.push('\n');
    result
}
