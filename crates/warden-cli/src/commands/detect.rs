//! `warden detect`: show which topics a text would trigger.

use std::collections::HashSet;

use anyhow::Result;
use warden_runtime::config_bridge;
use warden_skills::FsDocumentStore;

use super::load_config;
use crate::theme::Theme;

/// Print the topics `text` matches, with the document each would load.
pub(crate) fn run_detect(text: &str) -> Result<()> {
    let resolved = load_config()?;
    let registry = config_bridge::to_topic_registry(&resolved.config)?;
    let store = FsDocumentStore::new(resolved.skills_dir())
        .with_file_name(resolved.config.skills.document_file.as_str());

    let none = HashSet::new();
    let matched: Vec<_> = registry.matching(text, &none).collect();
    if matched.is_empty() {
        println!("{}", Theme::dimmed("No topics matched."));
        return Ok(());
    }

    println!("{}", Theme::header("Matched topics"));
    for topic in matched {
        let path = store.document_path(topic.document());
        let marker = if path.is_file() {
            Theme::dimmed(&path.display().to_string())
        } else {
            Theme::warning(&format!("{} (missing)", path.display()))
        };
        println!("  {} {}", Theme::kv(topic.id().as_str(), topic.document().as_str()), marker);
    }
    Ok(())
}
