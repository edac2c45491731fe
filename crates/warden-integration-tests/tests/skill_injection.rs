//! End-to-end guidance injection through the assembled runtime.

mod common;

use common::WardenHarness;
use warden_config::Config;
use warden_core::{DeliverAs, HookEvent, NotifyLevel};
use warden_hooks::HookResult;
use warden_test::{MockHost, SkillsDir, file_call};

#[tokio::test]
async fn test_python_prompt_injects_once_per_session() {
    let mut h = WardenHarness::new(MockHost::new());

    let first = h.prompt("please write a python script").await;
    assert_eq!(first, HookResult::append("\n\n# Python guidelines"));
    assert!(h.session.injections.has("python"));
    assert_eq!(h.session.injections.len(), 1);

    let second = h.prompt("more python please").await;
    assert_eq!(second, HookResult::Continue);
}

#[tokio::test]
async fn test_all_matching_topics_in_one_prompt() {
    let mut h = WardenHarness::new(MockHost::new());

    let result = h.prompt("search the web, then wrap pytest in a bash script").await;
    let text = result.appended_text().unwrap();

    let python = text.find("# Python guidelines").unwrap();
    let shell = text.find("# Shell guidelines").unwrap();
    let search = text.find("# Search guidelines").unwrap();
    assert!(python < shell && shell < search);
    assert_eq!(h.session.injections.len(), 3);
}

#[tokio::test]
async fn test_shell_path_schedules_one_message() {
    let mut h = WardenHarness::new(MockHost::new());

    assert_eq!(h.tool(file_call("read", "deploy.sh")).await, HookResult::Continue);
    assert_eq!(h.tool(file_call("edit", "build.sh")).await, HookResult::Continue);
    assert_eq!(h.tool(file_call("write", "scripts/release.sh")).await, HookResult::Continue);

    let messages = h.host.messages();
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message.custom_type, "auto-skill");
    assert_eq!(message.topic.as_deref(), Some("shell"));
    assert_eq!(message.deliver_as, DeliverAs::NextTurn);
    assert!(!message.display);
    assert!(message.content.starts_with("[Auto-loaded shell-script-guidelines guidelines]"));
    assert!(message.content.ends_with("# Shell guidelines"));

    assert_eq!(
        h.host.notifications(),
        vec![("Loaded shell-script-guidelines skill".to_string(), NotifyLevel::Info)]
    );
}

#[tokio::test]
async fn test_prompt_and_path_share_the_tracker() {
    let mut h = WardenHarness::new(MockHost::new());

    assert!(h.prompt("fix this bash loop").await.appended_text().is_some());
    h.tool(file_call("read", "deploy.sh")).await;

    assert!(h.host.messages().is_empty());
}

#[tokio::test]
async fn test_session_start_re_arms_topics() {
    let mut h = WardenHarness::new(MockHost::new());

    assert!(h.prompt("python").await.appended_text().is_some());
    assert_eq!(h.prompt("python").await, HookResult::Continue);

    h.send(HookEvent::SessionStart).await;
    assert!(h.session.injections.is_empty());
    assert!(h.prompt("python").await.appended_text().is_some());
}

#[tokio::test]
async fn test_sessions_do_not_share_injections() {
    let mut h = WardenHarness::new(MockHost::new());
    assert!(h.prompt("python").await.appended_text().is_some());

    let mut other = h.runtime.new_session();
    let dispatch = h
        .runtime
        .dispatch(
            &HookEvent::BeforeAgentStart {
                prompt: "python".to_string(),
            },
            &mut other,
            &h.host,
        )
        .await;
    assert!(dispatch.result.appended_text().is_some());
}

#[tokio::test]
async fn test_missing_document_stays_eligible() {
    let mut h = WardenHarness::with_parts(&Config::default(), SkillsDir::new(), MockHost::new());

    assert_eq!(h.prompt("pytest is failing").await, HookResult::Continue);
    assert!(!h.session.injections.has("python"));

    let doc_dir = h.skills.path().join("python-dev-guidelines");
    std::fs::create_dir_all(&doc_dir).unwrap();
    std::fs::write(doc_dir.join("SKILL.md"), "installed later").unwrap();

    assert_eq!(
        h.prompt("pytest is still failing").await,
        HookResult::append("\n\ninstalled later")
    );
}

#[tokio::test]
async fn test_missing_path_document_sends_nothing() {
    let mut h = WardenHarness::with_parts(&Config::default(), SkillsDir::new(), MockHost::new());

    h.tool(file_call("read", "deploy.sh")).await;

    assert!(h.host.messages().is_empty());
    assert!(h.host.notifications().is_empty());
    assert!(h.session.injections.is_empty());
}

#[tokio::test]
async fn test_skills_disabled() {
    let mut cfg = Config::default();
    cfg.skills.enabled = false;
    let mut h = WardenHarness::with_parts(&cfg, warden_test::default_skills_dir(), MockHost::new());

    assert_eq!(h.prompt("python").await, HookResult::Continue);
    h.tool(file_call("read", "deploy.sh")).await;
    assert!(h.host.messages().is_empty());
}
