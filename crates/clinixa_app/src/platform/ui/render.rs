use clinixa_core::{AppViewModel, ConditionRowView, Field, SessionPhase};

use super::constants::*;

pub fn banner() -> Vec<String> {
    vec![
        APP_TITLE.to_string(),
        APP_TAGLINE.to_string(),
        String::new(),
        DISCLAIMER_BANNER.to_string(),
        String::new(),
    ]
}

/// Renders the session part of the view: loading text, error banner or results.
pub fn render(view: &AppViewModel) -> Vec<String> {
    match view.phase {
        SessionPhase::Idle => Vec::new(),
        SessionPhase::Loading => vec![LOADING_TEXT.to_string()],
        SessionPhase::Error => view
            .error_message
            .as_deref()
            .map(|message| vec![format!("Error: {message}")])
            .unwrap_or_default(),
        SessionPhase::Result => render_results(view),
    }
}

pub fn render_field_errors(view: &AppViewModel) -> Vec<String> {
    Field::ALL
        .iter()
        .filter_map(|field| {
            view.field_errors
                .get(*field)
                .map(|message| format!("  {}: {}", field_label(*field), message))
        })
        .collect()
}

fn render_results(view: &AppViewModel) -> Vec<String> {
    let Some(results) = &view.results else {
        return Vec::new();
    };

    let mut lines = vec![
        "Analysis Results".to_string(),
        "================".to_string(),
        String::new(),
        "Possible Conditions".to_string(),
    ];
    for (index, condition) in results.conditions.iter().enumerate() {
        lines.extend(format_condition(index + 1, condition));
    }

    lines.push(String::new());
    lines.push("Recommended Precautions".to_string());
    lines.extend(
        results
            .precautions
            .iter()
            .map(|precaution| format!("  - {precaution}")),
    );

    lines.push(String::new());
    lines.push("When to Seek Medical Help".to_string());
    lines.push(format!("  {}", results.when_to_seek_help));

    lines.push(String::new());
    lines.push(format!("Disclaimer: {}", results.disclaimer));
    lines
}

fn format_condition(position: usize, condition: &ConditionRowView) -> Vec<String> {
    vec![
        format!(
            "  {position}. {name} [{likelihood} likelihood]",
            name = condition.name,
            likelihood = condition.likelihood
        ),
        format!("     {}", condition.description),
    ]
}
