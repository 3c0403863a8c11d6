//! Preferences: color theme and summary provider

use anyhow::{anyhow, Result};

use super::ui::{self, status};
use super::{AiArgs, AppSession};
use crate::summarize::SummaryConfig;

/// Execute the theme command
pub fn run_theme(session: &AppSession, mode: Option<&str>) -> Result<()> {
    let dark = match mode.map(|m| m.trim().to_lowercase()) {
        None => session.dark_mode()?,
        Some(m) if m == "dark" => {
            session.set_dark_mode(true)?;
            true
        }
        Some(m) if m == "light" => {
            session.set_dark_mode(false)?;
            false
        }
        Some(m) if m == "toggle" => session.toggle_dark_mode()?,
        Some(m) => return Err(anyhow!("Unknown theme '{}'. Use dark, light or toggle.", m)),
    };

    ui::set_dark_mode(dark);
    status(if dark { "dark" } else { "light" });
    Ok(())
}

/// Execute the ai command
pub fn run_ai_config(session: &AppSession, args: &AiArgs) -> Result<()> {
    let store = session.store();

    if args.clear {
        SummaryConfig::clear(store)?;
        status("Cleared.");
        return Ok(());
    }

    let update = SummaryConfig {
        api_key: args.api_key.clone(),
        api_url: args.api_url.clone(),
        api_endpoint: args.endpoint.clone(),
        model: args.model.clone(),
    };
    let changed = update != SummaryConfig::default();
    if changed {
        update.save(store)?;
    }

    let config = SummaryConfig::load(store)?;
    println!(
        "provider: {}",
        if config.is_configured() { "remote" } else { "disabled" }
    );
    println!("url:      {}{}", config.effective_api_url(), config.effective_api_endpoint());
    println!("model:    {}", config.effective_model());
    if changed {
        status("Saved.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::session::Session;

    #[test]
    fn test_theme_modes() {
        let session = Session::new(Database::open_memory().unwrap());
        run_theme(&session, Some("dark")).unwrap();
        assert!(session.dark_mode().unwrap());
        run_theme(&session, Some("toggle")).unwrap();
        assert!(!session.dark_mode().unwrap());
        assert!(run_theme(&session, Some("sepia")).is_err());
    }
}
