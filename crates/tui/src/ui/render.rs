use super::theme::Theme;
use crate::keybinds::Keybinds;
use crate::onboarding::{SetupStep, WizardState};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use sassyshell_config::provider::find_provider;
use sassyshell_config::PROVIDERS;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const INPUT_PREFIX: &str = "> ";

struct StepBody {
    lines: Vec<Line<'static>>,
    /// (line index, column) of the text cursor, for text-entry steps.
    cursor: Option<(u16, u16)>,
}

pub fn render_wizard(
    frame: &mut Frame,
    wizard: &WizardState,
    saved_path: Option<&Path>,
    theme: &Theme,
) {
    let area = frame.area();
    let step = wizard.step();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" SassyShell Setup - {} ", step.title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::styled("🚀 SassyShell Interactive Setup", theme.title)),
        chunks[0],
    );

    if let Some(number) = step.number() {
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("Step {} of {}", number, SetupStep::COUNT),
                theme.subtitle,
            )),
            chunks[1],
        );
    }

    let body = step_body(wizard, saved_path, theme);
    if let Some((line, column)) = body.cursor {
        let rect = chunks[2];
        if line < rect.height {
            let x = rect.x.saturating_add(column).min(rect.right().saturating_sub(1));
            frame.set_cursor_position((x, rect.y + line));
        }
    }
    frame.render_widget(Paragraph::new(body.lines), chunks[2]);

    if let Some(error) = wizard.error() {
        frame.render_widget(
            Paragraph::new(Line::styled(format!("✗ {error}"), theme.error)),
            chunks[3],
        );
    }

    if let Some(hint) = Keybinds.footer(step) {
        render_footer(frame, chunks[4], hint, theme);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, hint: &'static str, theme: &Theme) {
    frame.render_widget(Paragraph::new(Line::styled(hint, theme.hint)), area);
}

fn step_body(wizard: &WizardState, saved_path: Option<&Path>, theme: &Theme) -> StepBody {
    let provider = wizard.provider();
    match wizard.step() {
        SetupStep::ChooseProvider => {
            let mut lines = vec![Line::raw("Select your LLM provider:"), Line::raw("")];
            for (i, option) in PROVIDERS.iter().enumerate() {
                let selected = i == wizard.selected_provider();
                let prefix = if selected { INPUT_PREFIX } else { "  " };
                let label = format!("{prefix}{}. {}", i + 1, option.display_name);
                let mut spans = vec![if selected {
                    Span::styled(label, theme.highlight)
                } else {
                    Span::raw(label)
                }];
                if i == 0 {
                    spans.push(Span::styled(" (recommended)", theme.subtitle));
                }
                lines.push(Line::from(spans));
            }
            if let Some(existing) = wizard.existing() {
                let name = find_provider(&existing.provider)
                    .map(|p| p.display_name)
                    .unwrap_or(existing.provider.as_str());
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    format!(
                        "Existing configuration ({} / {}) will be overwritten.",
                        name, existing.model
                    ),
                    theme.subtitle,
                ));
            }
            StepBody {
                lines,
                cursor: None,
            }
        }
        SetupStep::EnterModel => {
            let input = if wizard.model.is_empty() {
                Line::from(vec![
                    Span::raw(INPUT_PREFIX),
                    Span::styled(
                        format!("{} (leave blank for default)", provider.default_model),
                        theme.subtitle,
                    ),
                ])
            } else {
                Line::raw(format!("{INPUT_PREFIX}{}", wizard.model.value()))
            };
            StepBody {
                lines: vec![
                    Line::raw(format!("Provider: {}", provider.display_name)),
                    Line::raw(""),
                    Line::raw("Enter model name:"),
                    input,
                ],
                cursor: Some((3, text_column(wizard.model.value(), wizard.model.cursor()))),
            }
        }
        SetupStep::EnterApiKey => {
            let masked = wizard.api_key.masked('*');
            let cursor = text_column(&masked, wizard.api_key.cursor());
            StepBody {
                lines: vec![
                    Line::raw(format!("Provider: {}", provider.display_name)),
                    Line::raw(format!("Model: {}", wizard.model.value())),
                    Line::raw(""),
                    Line::raw("Enter your API key (input is hidden):"),
                    Line::raw(format!("{INPUT_PREFIX}{masked}")),
                ],
                cursor: Some((4, cursor)),
            }
        }
        SetupStep::Confirm => StepBody {
            lines: vec![
                Line::raw("Please confirm your settings:"),
                Line::raw(""),
                Line::raw(format!("Provider: {}", provider.identifier)),
                Line::raw(format!("Model: {}", wizard.model.value())),
                Line::raw(format!("API Key: {}", wizard.redacted_api_key())),
                Line::raw(""),
                Line::styled("Save configuration?", theme.highlight),
            ],
            cursor: None,
        },
        SetupStep::Complete => {
            let location = saved_path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "~/.config/sassyshell/.env".to_string());
            StepBody {
                lines: vec![
                    Line::styled("✅ Setup complete!", theme.success),
                    Line::raw(""),
                    Line::raw(format!("Configuration saved to {location}")),
                    Line::raw("You can now use 'sassysh ask' to query your AI assistant!"),
                    Line::raw(""),
                    Line::styled("Press any key to exit.", theme.hint),
                ],
                cursor: None,
            }
        }
    }
}

/// Display column of the cursor, counting double-width characters as two.
fn text_column(shown: &str, cursor: usize) -> u16 {
    let before: String = shown.chars().take(cursor).collect();
    let column = INPUT_PREFIX.width() + before.width();
    u16::try_from(column).unwrap_or(u16::MAX)
}
