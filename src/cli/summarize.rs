use anyhow::Result;

use super::ui::{status, warning};
use super::{resolve_note_id, AppSession};
use crate::summarize::{summarizer_from_config, SummaryConfig};

/// Execute the summarize command
pub fn run_summarize(session: &mut AppSession, identifier: &str) -> Result<()> {
    let id = resolve_note_id(session, identifier)?;
    session.select_note(Some(&id));

    let text = session.edit_buffer().content.clone();
    if text.trim().is_empty() {
        warning("Nothing to summarize.");
        return Ok(());
    }

    let config = SummaryConfig::load(session.store())?;
    let summarizer = summarizer_from_config(&config);

    println!("Summarizing...");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session.request_summary(&id, &text, summarizer.as_ref()))?;

    if let Some(note) = session.notes().get(&id) {
        println!();
        status(&note.summary);
    }
    Ok(())
}
