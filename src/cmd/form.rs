//! Campaign form filling from flags and interactive prompts.

use anyhow::{Context, Result};
use dialer::{CampaignForm, Voice};
use dialoguer::{Input, Select, theme::ColorfulTheme};

use super::super::RunArgs;

/// Fill a form from `run` flags. Absent flags leave fields empty.
pub fn form_from_args(args: &RunArgs) -> Result<CampaignForm> {
    let mut form = CampaignForm::new();

    if let Some(caller) = &args.caller {
        form.set_caller_number(caller.as_str());
    }
    if let Some(assistant) = &args.assistant {
        form.set_assistant_name(assistant.as_str());
    }
    if let Some(persona) = &args.persona {
        form.set_persona_description(persona.as_str());
    }
    if let Some(prompt) = &args.prompt {
        form.set_prompt(prompt.as_str());
    } else if let Some(path) = &args.prompt_file {
        let prompt = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;
        form.set_prompt(prompt.trim_end());
    }
    if let Some(path) = &args.customers {
        form.set_customer_file(path.clone());
    }
    if let Some(voice) = args.voice {
        form.set_voice(voice);
    }

    Ok(form)
}

fn ask(theme: &ColorfulTheme, prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Prompt for every field still empty, in panel order.
pub fn prompt_missing(form: &mut CampaignForm, ask_voice: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    if form.caller_number().is_empty() {
        form.set_caller_number(ask(&theme, "Your phone number (+90 5xx xxx xx xx)")?);
    }
    if form.assistant_name().is_empty() {
        form.set_assistant_name(ask(&theme, "Assistant name")?);
    }
    if form.persona_description().is_empty() {
        form.set_persona_description(ask(&theme, "Persona (how should the assistant sound?)")?);
    }
    if form.prompt().is_empty() {
        form.set_prompt(ask(&theme, "Conversation prompt")?);
    }
    if form.customer_file().is_none() {
        let path = ask(&theme, "Customer file (.xlsx, .xls, .csv)")?;
        if !path.trim().is_empty() {
            form.set_customer_file(path.trim());
        }
    }
    if ask_voice {
        let labels: Vec<&str> = Voice::ALL.iter().map(|v| v.label()).collect();
        let current = Voice::ALL
            .iter()
            .position(|v| *v == form.voice())
            .unwrap_or(0);
        let selection = Select::with_theme(&theme)
            .with_prompt("Voice")
            .items(&labels)
            .default(current)
            .interact()?;
        form.set_voice(Voice::ALL[selection]);
    }

    Ok(())
}
